//! `vars` command: list the variables of a template

use anyhow::Result;
use colored::*;

use super::read_template;
use crate::cli::TemplateSource;
use crate::template::Template;

pub fn handle_vars_command(source: &TemplateSource) -> Result<()> {
    let text = read_template(source)?;
    let template = Template::parse_required(&text)?;

    for variable in template.variables() {
        println!("{}", variable.cyan());
    }
    Ok(())
}
