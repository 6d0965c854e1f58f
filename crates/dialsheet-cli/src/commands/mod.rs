use anyhow::Result;
use dialsheet_config::AppConfig;
use dialsheet_core::{ContactFilter, ContactsResponse};
use dialsheet_import::ContactPipeline;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod extract;
pub mod health;
pub mod manual;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

impl Context<'_> {
    pub fn pipeline(&self, filter: Option<ContactFilter>) -> ContactPipeline {
        let pipeline = ContactPipeline::new(self.config);
        match filter {
            Some(filter) => pipeline.with_filter(filter),
            None => pipeline,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// JSON response, or one `number  name` line per contact followed by the summary.
pub fn print_contacts(ctx: &Context<'_>, response: &ContactsResponse) -> Result<()> {
    if ctx.json {
        return print_json(response);
    }
    let mut stdout = io::stdout().lock();
    let width = response
        .contacts
        .iter()
        .map(|contact| contact.number.as_str().len())
        .max()
        .unwrap_or(0);
    for contact in &response.contacts {
        writeln!(
            stdout,
            "{:<width$}  {}",
            contact.number.as_str(),
            contact.name,
            width = width
        )?;
    }
    writeln!(stdout, "{}", response.message)?;
    Ok(())
}
