use attest_lens_engine::{
    AssetCard, AttestorOption, Badge, BadgeRender, DetailView, RecipeOption, ResolutionMode,
    RingView,
};
use attest_lens_records::IngestReport;
use std::fmt::Write;

pub fn render_ring(view: &RingView) -> String {
    let mut out = String::new();
    let mode = match &view.mode {
        ResolutionMode::Recipe(name) => format!("recipe {name}"),
        ResolutionMode::Freeform => "freeform".to_string(),
    };
    let _ = writeln!(out, "{} ({mode}, {} badges)", view.asset, view.badges.len());

    for badge in &view.badges {
        let _ = writeln!(
            out,
            "  #{:<2} ({:>6.1}, {:>6.1})  {:<28} {}",
            badge.index(),
            badge.position.top,
            badge.position.left,
            truncate(&badge.slot.label, 28),
            describe_badge(badge)
        );
    }

    if view.truncated > 0 {
        let _ = writeln!(out, "  ... {} more not shown", view.truncated);
    }
    out.trim_end().to_string()
}

fn describe_badge(badge: &Badge) -> String {
    match &badge.render {
        BadgeRender::Ring(ring) if ring.full_ring => "permanent".to_string(),
        BadgeRender::Ring(ring) => {
            let mut text = format!("{:.0}% {}", ring.fill * 100.0, ring.color_tier.as_str());
            if ring.is_expired {
                text.push_str(" expired");
            }
            text
        }
        BadgeRender::Empty => {
            let reason = badge
                .slot
                .kind
                .empty_reason()
                .map_or("missing", |reason| reason.as_str());
            format!("empty ({reason})")
        }
        BadgeRender::Flagged { reason } => format!("flagged: {reason}"),
    }
}

pub fn render_detail(index: usize, detail: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{index} {}", detail.title());
    for (label, value) in detail.rows() {
        let _ = writeln!(out, "  {label}: {value}");
    }
    if let Some(link) = detail.link() {
        let _ = writeln!(out, "  Link: {link}");
    }
    out.trim_end().to_string()
}

pub fn render_attestors(options: &[AttestorOption]) -> String {
    options
        .iter()
        .map(|option| option.label.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_recipes(options: &[RecipeOption]) -> String {
    options
        .iter()
        .map(|option| {
            let marker = if option.selected { '*' } else { ' ' };
            format!("{marker} {}", option.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_card(card: &AssetCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.name);
    if let Some(ticker) = &card.ticker {
        let _ = writeln!(out, "  Ticker: {ticker}");
    }
    if let Some(issuer) = &card.issuer {
        let _ = writeln!(out, "  Issuer: {issuer}");
    }
    if let Some(chain) = &card.blockchain {
        let _ = writeln!(out, "  Chain: {chain}");
    }
    let _ = writeln!(
        out,
        "  Token standard: {} <{}>",
        card.token_standard, card.token_standard_url
    );
    out.trim_end().to_string()
}

pub fn render_ingest(reports: &[IngestReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "{}: {} accepted, {} rejected",
            report.corpus,
            report.accepted,
            report.rejected_count()
        );
        for err in &report.rejected {
            let _ = writeln!(out, "  - {err}");
        }
    }
    out.trim_end().to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
