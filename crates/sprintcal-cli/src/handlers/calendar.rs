use super::parse_date;
use crate::cli::{CalendarAction, OwnerArgs, SelectArgs};
use crate::context::CliContext;
use crate::output;
use sprintcal_domain::SprintId;

pub fn handle_owner(ctx: &mut CliContext, args: OwnerArgs) -> anyhow::Result<()> {
    let date = parse_date(&args.date)?;
    ctx.restore_selection(args.selected);
    let report = ctx.owner(date);
    output::output_success(&report, ctx.take_notices());
    Ok(())
}

pub fn handle_select(ctx: &mut CliContext, args: SelectArgs) -> anyhow::Result<()> {
    ctx.restore_selection(args.selected);
    let report = match (args.id, args.date) {
        (Some(id), _) => ctx.select_sprint(&SprintId::from(id))?,
        (None, Some(date)) => ctx.select_date(parse_date(&date)?),
        (None, None) => anyhow::bail!("Either --id or --date is required"),
    };
    output::output_success(&report, ctx.take_notices());
    Ok(())
}

pub fn handle(ctx: &mut CliContext, action: CalendarAction) -> anyhow::Result<()> {
    match action {
        CalendarAction::Month {
            year,
            month,
            selected,
        } => {
            ctx.restore_selection(selected);
            let grid = ctx.month_grid(year, month)?;
            output::output_success(&grid, ctx.take_notices());
        }
        CalendarAction::Year { year, selected } => {
            ctx.restore_selection(selected);
            let grid = ctx.year_grid(year)?;
            output::output_success(&grid, ctx.take_notices());
        }
    }
    Ok(())
}
