//! Implementation of the `stratlify render` command.
//!
//! Validates an input record and prints the prompt a flow would send,
//! with its safety settings, without contacting the backend.

use super::io::read_json_input;
use crate::cli::RenderArgs;
use stratlify::error::{Result, StratlifyError};
use stratlify::flow::InvokeOptions;
use stratlify::flows::{self, FlowKind};

/// Parse a flow argument (registered name or command name).
pub fn parse_flow(name: &str) -> Result<FlowKind> {
    FlowKind::from_name(name).ok_or_else(|| {
        StratlifyError::UserError(format!(
            "unknown flow '{}'.\n\nKnown flows: {}",
            name,
            FlowKind::all()
                .iter()
                .map(|k| format!("{} ({})", k.command(), k.name()))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Build the text printed by `render`.
pub fn render(args: &RenderArgs, options: &InvokeOptions) -> Result<String> {
    let kind = parse_flow(&args.flow)?;
    let input = read_json_input(&args.input)?;
    let prepared = flows::prepare(kind, &input, options)?;

    let mut out = String::new();
    out.push_str(&format!("# {}\n", kind.name()));
    if prepared.request.safety.is_empty() {
        out.push_str("# safety: none\n");
    } else {
        for setting in &prepared.request.safety {
            out.push_str(&format!(
                "# safety: {} = {}\n",
                setting.category.api_name(),
                setting.threshold.api_name()
            ));
        }
    }
    out.push('\n');
    out.push_str(&prepared.request.prompt);
    Ok(out)
}

/// Execute the `stratlify render` command.
pub fn cmd_render(args: RenderArgs, options: &InvokeOptions) -> Result<()> {
    print!("{}", render(&args, options)?);
    Ok(())
}
