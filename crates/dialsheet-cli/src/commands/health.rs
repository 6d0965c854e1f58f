use crate::commands::{print_json, Context};
use anyhow::Result;
use dialsheet_core::HealthStatus;

pub fn health(ctx: &Context<'_>) -> Result<()> {
    let status = HealthStatus::healthy();
    if ctx.json {
        return print_json(&status);
    }
    println!("{}: {}", status.status, status.message);
    Ok(())
}
