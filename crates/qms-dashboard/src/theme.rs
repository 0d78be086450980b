use qms_core::Domain;
use ratatui::style::{Color, Modifier, Style};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Rgb(142, 192, 124))
    .add_modifier(Modifier::BOLD);
pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(131, 165, 152))
    .fg(Color::Black)
    .add_modifier(Modifier::BOLD);
pub const ACCENT: Color = Color::Rgb(250, 189, 47);
pub const MUTED: Color = Color::Rgb(146, 131, 116);

const GREEN: Color = Color::Rgb(184, 187, 38);
const AQUA: Color = Color::Rgb(131, 165, 152);
const BLUE: Color = Color::Rgb(69, 133, 136);
const YELLOW: Color = Color::Rgb(250, 189, 47);
const ORANGE: Color = Color::Rgb(254, 128, 25);
const RED: Color = Color::Rgb(251, 73, 52);
const PURPLE: Color = Color::Rgb(211, 134, 155);
const INDIGO: Color = Color::Rgb(125, 174, 163);

pub fn zebra_row_style(index: usize) -> Style {
    let bg = if index % 2 == 0 {
        Color::Rgb(18, 20, 26)
    } else {
        Color::Rgb(24, 27, 34)
    };
    Style::new().bg(bg)
}

pub mod icons {
    pub const OVERDUE: &str = "!";
    pub const ON_TRACK: &str = " ";
}

pub fn status_color(domain: Domain, status: &str) -> Color {
    match domain {
        Domain::Documents => document_status_color(status),
        Domain::Audits | Domain::Training => schedule_status_color(status),
        Domain::NonConformance => nc_status_color(status),
    }
}

pub fn document_status_color(status: &str) -> Color {
    match status {
        "active" => GREEN,
        "draft" => YELLOW,
        "review" => BLUE,
        _ => MUTED,
    }
}

/// Audits and training sessions.
pub fn schedule_status_color(status: &str) -> Color {
    match status {
        "completed" => GREEN,
        "in-progress" => BLUE,
        "scheduled" => YELLOW,
        _ => MUTED,
    }
}

pub fn nc_status_color(status: &str) -> Color {
    match status {
        "open" => RED,
        "in-progress" => YELLOW,
        "closed" => GREEN,
        _ => MUTED,
    }
}

pub fn severity_color(severity: &str) -> Color {
    match severity {
        "critical" => RED,
        "major" => ORANGE,
        "minor" => YELLOW,
        _ => MUTED,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority {
        "high" => RED,
        "medium" => YELLOW,
        "low" => GREEN,
        _ => MUTED,
    }
}

pub fn document_category_color(category: &str) -> Color {
    match category {
        "policy" => PURPLE,
        "procedure" => BLUE,
        "form" => GREEN,
        "checklist" => YELLOW,
        _ => MUTED,
    }
}

pub fn audit_type_color(audit_type: &str) -> Color {
    match audit_type {
        "internal" => PURPLE,
        "supplier" => ORANGE,
        "customer" => RED,
        "management" => INDIGO,
        "process" => AQUA,
        _ => MUTED,
    }
}

pub fn nc_category_color(category: &str) -> Color {
    match category {
        "material" => BLUE,
        "documentation" => PURPLE,
        "equipment" => INDIGO,
        "training" => GREEN,
        "product" => RED,
        _ => MUTED,
    }
}
