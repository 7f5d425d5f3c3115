use super::{parse_date, parse_optional_date};
use crate::cli::{SprintAction, SprintCreateArgs, SprintUpdateArgs};
use crate::context::CliContext;
use crate::output;
use sprintcal_domain::{FieldUpdate, SprintId, SprintPatch};

pub fn handle(ctx: &mut CliContext, action: SprintAction) -> anyhow::Result<()> {
    match action {
        SprintAction::Create(args) => handle_create(ctx, args)?,
        SprintAction::List => {
            let sprints = ctx.list_sprints();
            output::output_list(sprints, ctx.take_notices());
        }
        SprintAction::Get { id } => {
            let id = SprintId::from(id);
            match ctx.get_sprint(&id).cloned() {
                Some(sprint) => output::output_success(&sprint, ctx.take_notices()),
                None => {
                    output::output_error(&format!("Sprint not found: {}", id), ctx.take_notices())
                }
            }
        }
        SprintAction::Update(args) => handle_update(ctx, args)?,
        SprintAction::Delete { id, selected } => {
            let id = SprintId::from(id);
            ctx.restore_selection(selected);
            let outcome = ctx.delete_sprint(&id);
            if outcome.deleted.is_none() {
                tracing::debug!("Delete of unknown sprint {} ignored", id);
            }
            output::output_success(&outcome, ctx.take_notices());
        }
        SprintAction::Clear => {
            let count = ctx.store().len();
            let selection_cleared = ctx.clear_sprints();
            output::output_success(
                serde_json::json!({
                    "cleared": count,
                    "selection_cleared": selection_cleared,
                }),
                ctx.take_notices(),
            );
        }
    }
    Ok(())
}

fn handle_create(ctx: &mut CliContext, args: SprintCreateArgs) -> anyhow::Result<()> {
    let start = parse_optional_date(args.start)?;
    let end = parse_optional_date(args.end)?;
    let today = chrono::Local::now().date_naive();

    let sprint = ctx.create_sprint(args.name, args.description, start, end, today)?;
    output::output_success(&sprint, ctx.take_notices());
    Ok(())
}

fn handle_update(ctx: &mut CliContext, args: SprintUpdateArgs) -> anyhow::Result<()> {
    let patch = SprintPatch {
        name: args.name,
        description: FieldUpdate::from_flags(args.description, args.clear_description),
        start_date: args.start.as_deref().map(parse_date).transpose()?,
        end_date: args.end.as_deref().map(parse_date).transpose()?,
        color: args.color,
    };

    let sprint = ctx.update_sprint(&SprintId::from(args.id), patch)?;
    output::output_success(&sprint, ctx.take_notices());
    Ok(())
}
