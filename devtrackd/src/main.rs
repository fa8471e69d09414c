use clap::Parser;
use devtrack_module_importer::{ImportDeviations, LinkAttachments};
use std::process::{ExitCode, Termination};

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the API server
    Api(devtrack_server::Run),
    /// Import a deviation matrix export into the database
    Import(ImportDeviations),
    /// Link attachment files in the attachment directory to their deviations
    LinkAttachments(LinkAttachments),
}

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "devtrackd",
    long_about = None
)]
pub struct Devtrackd {
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Devtrackd {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Api(run) => run.run().await,
            Command::Import(run) => run.run().await,
            Command::LinkAttachments(run) => run.run().await,
        }
    }
}

#[actix_web::main]
async fn main() -> impl Termination {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    Devtrackd::parse().run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Devtrackd::command().debug_assert();
    }
}
