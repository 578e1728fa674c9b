use clap::Parser;
use miette::Result;
use sandbox::cli::{dispatch, Cli};
use sandbox::core::{configure_logging, Config};
use sandbox::docker::Docker;
use sandbox::logic::{Assets, Builder, Composer, Services};

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    configure_logging(cli.global.log);
    let config = Config::instance(cli.global.config.as_deref())?;

    tracing::debug!("Base assets directory: {}", config.assets_path().display());

    let docker = Docker::new(config.get_default_value("docker_socket")?);
    let assets = Assets::from_config(config);
    let builder = Builder::new(&docker, &assets, config.docker_registry());
    let composer = Composer::new(&docker, &assets, config.sandbox_prefix());

    let services = Services {
        builder: &builder,
        composer: &composer,
        assets: &assets,
        runtime: &docker,
    };

    let stdout = std::io::stdout();
    dispatch(cli.command, &services, &mut stdout.lock())
}
