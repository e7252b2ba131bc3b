//! Command dispatch.
//!
//! Store commands run on a single-threaded tokio runtime; bulk store
//! operations still overlap through bounded fan-out.

use anyhow::{Context, Result, bail};

use super::{
    args::Command,
    commands::{
        check::{check, list},
        files::{add_field, create, delete, rename, show, upload},
        generate::generate,
        init::init,
    },
    exit_status::ExitStatus,
};

pub fn run(command: Command) -> Result<ExitStatus> {
    match command {
        Command::Init => init(),
        // Serve is handled in main.rs before calling run()
        Command::Serve => bail!("Serve command should be handled before run()"),
        command => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(dispatch(command))
        }
    }
}

async fn dispatch(command: Command) -> Result<ExitStatus> {
    match command {
        Command::Check(cmd) => check(cmd).await,
        Command::List(cmd) => list(cmd).await,
        Command::Show(cmd) => show(cmd).await,
        Command::Create(cmd) => create(cmd).await,
        Command::Delete(cmd) => delete(cmd).await,
        Command::Rename(cmd) => rename(cmd).await,
        Command::Upload(cmd) => upload(cmd).await,
        Command::AddField(cmd) => add_field(cmd).await,
        Command::Generate(cmd) => generate(cmd).await,
        Command::Init | Command::Serve => bail!("{:?} is not a store command", command),
    }
}
