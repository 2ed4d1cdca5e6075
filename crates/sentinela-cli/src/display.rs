//! Terminal rendering for alert rows, map markers, and the confirmation card.

use sentinela_core::alerts::ALERTS_TITLE;
use sentinela_core::shell::Marker;
use sentinela_core::{AlertList, AlertRow, ConfirmationSummary, IconKey, ReportWizard};

const LABEL_WIDTH: usize = 22;

fn icon_glyph(icon: IconKey) -> &'static str {
    match icon {
        IconKey::Rain => "[chuva]",
        IconKey::Fire => "[fogo]",
        IconKey::Earth => "[terra]",
        IconKey::Alert => "[alerta]",
    }
}

fn field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("  {:<width$} {}", label, value, width = LABEL_WIDTH);
}

// ── Alerts ──

/// Print the alert list, one card per row; expanded rows show their detail.
pub fn print_alerts(list: &AlertList) {
    println!("=== {} ===", ALERTS_TITLE);
    if list.is_empty() {
        println!("(nenhum alerta)");
        return;
    }
    println!();
    for (i, row) in list.rows().iter().enumerate() {
        print_alert_row(i, row);
    }
}

fn print_alert_row(index: usize, row: &AlertRow) {
    let chevron = if row.is_expanded() { "^" } else { "v" };
    println!(
        "{:>3}. {} {} {}",
        index,
        icon_glyph(row.icon()),
        row.title(),
        chevron
    );
    if !row.is_expanded() {
        return;
    }
    let occurrence = row.occurrence();
    field("Descrição", row.description());
    field("Tipo", &occurrence.tipo);
    field("Registrado em", &occurrence.data_registro);
    field("Atualizado em", &occurrence.ultima_atualizacao);
    if let Some(c) = occurrence.coordinate() {
        field("Local", &format!("{:.5}, {:.5}", c.latitude, c.longitude));
    }
    println!();
}

// ── Map ──

pub fn print_markers(markers: &[Marker]) {
    for (i, marker) in markers.iter().enumerate() {
        let title = marker.detail.as_ref().map(|d| d.title.as_str()).unwrap_or("-");
        println!(
            "{:>3}. {} {:.5}, {:.5}  {}",
            i,
            icon_glyph(marker.icon),
            marker.coordinate.latitude,
            marker.coordinate.longitude,
            title
        );
    }
}

// ── Report ──

/// One-line wizard header: back arrow, title, step counter, progress bar.
pub fn print_wizard_header(wizard: &ReportWizard) {
    const BAR: usize = 24;
    let filled = wizard.progress_width(BAR as f32).round() as usize;
    println!(
        "{} {:<20} {}  [{}{}]",
        if wizard.can_retreat() { "<" } else { " " },
        wizard.step().title(),
        wizard.step_label(),
        "#".repeat(filled),
        ".".repeat(BAR.saturating_sub(filled)),
    );
}

pub fn print_confirmation(summary: &ConfirmationSummary) {
    println!("=== Confirme os Dados ===");
    println!();
    field("Endereço", &summary.address);
    let kind = match summary.icon {
        Some(icon) => format!("{} {}", icon_glyph(icon), summary.kind_label),
        None => summary.kind_label.to_string(),
    };
    field("Tipo de Ocorrência", &kind);
    field("Descrição", &summary.description);
    field("Anexo", summary.attachment);
    println!();
}
