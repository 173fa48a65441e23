use colored::*;
use tracing::{info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::commands::{Context, report};
use crate::mprint;
use crate::terminal::print;

/// Reports every network card. Ports that cannot be fully inspected are
/// reported individually and the pass continues.
pub fn all(ctx: &Context) -> anyhow::Result<()> {
    print::header("network controllers");

    let span = info_span!("network", indicatif.pb_show = true);
    span.pb_set_message("inspecting network controllers");
    let guard = span.enter();
    let cards = ctx.inspector().inspect_network_cards()?;
    drop(guard);
    drop(span);

    if cards.is_empty() {
        print::no_results();
        return Ok(());
    }

    let mut ports = 0;
    let mut incomplete = 0;
    for card in &cards {
        report::print_card(card, &ctx.cfg.display);
        print::fat_separator();
        ports += card.ports.len();
        incomplete += card.ports.iter().filter(|p| !p.problems.is_empty()).count();
    }

    let summary = format!(
        "{} cards, {} ports inspected",
        cards.len().to_string().bold().green(),
        ports.to_string().bold().green()
    );
    print::centerln(&summary);
    if incomplete > 0 {
        warn!("{incomplete} port(s) could not be fully inspected");
    }
    mprint!();
    Ok(())
}
