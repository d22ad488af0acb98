use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::RunContext;

/// Dispatch a configured command to its handler.
pub fn dispatch(command: Commands, ctx: &mut RunContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Train(args) => commands::train::handle(&args, ctx, flags),
        Commands::Resolve(args) => commands::resolve::handle(&args, ctx, flags),
        Commands::Pairs(args) => commands::pairs::handle(&args, ctx, flags),
        Commands::Features | Commands::Schema(_) => {
            unreachable!("features/schema are pre-dispatched in main")
        }
    }
}
