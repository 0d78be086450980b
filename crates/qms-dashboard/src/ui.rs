use crate::state::{App, InputMode, Screen};
use crate::theme::{self, icons};
use chrono::NaiveDate;
use qms_core::{
    Audit, AuditSummary, Choice, Document, Domain, NonConformance, NonConformanceSummary,
    Overview, StatusTally, TrainingSession, TrainingSummary, DEFAULT_RECENT_LIMIT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

struct Tile {
    label: String,
    value: String,
    color: Color,
}

impl Tile {
    fn new(label: impl Into<String>, value: impl ToString, color: Color) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
            color,
        }
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(f, app, chunks[0]);

    let body = chunks[1];
    let domain = app.screen.domain();
    let (main, side) = if app.show_help || (app.show_detail && domain.is_some()) {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body);
        (split[0], Some(split[1]))
    } else {
        (body, None)
    };

    match domain {
        None => render_overview(f, app, main),
        Some(domain) => render_domain(f, app, domain, main),
    }

    if let Some(side) = side {
        match domain {
            _ if app.show_help => render_help(f, side),
            Some(domain) => render_details(f, app, domain, side),
            None => {}
        }
    }

    render_footer(f, app, chunks[2]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(idx, screen)| Line::from(format!("{} {}", idx + 1, screen.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("AS9100D Quality Management"),
        )
        .select(app.screen.index())
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(theme::HEADER_STYLE);
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled(
                "SEARCH ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "type to filter, Enter/Esc to finish, Ctrl-U to clear",
                Style::default().fg(theme::MUTED),
            ),
        ]),
        InputMode::Normal => Line::from(vec![
            Span::styled(
                format!("Today {} ", app.today),
                Style::default().fg(theme::ACCENT),
            ),
            Span::styled(
                "Tab/1-5 screens  / search  f filter  Enter details  ? help  q quit",
                Style::default().fg(theme::MUTED),
            ),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Yellow));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let keys = [
        ("Tab / S-Tab", "Next / previous screen"),
        ("1-5", "Jump to screen"),
        ("/", "Search (Enter/Esc to finish)"),
        ("f", "Cycle filter"),
        ("j / Down", "Next record"),
        ("k / Up", "Previous record"),
        ("Enter", "Toggle details pane"),
        ("Esc", "Close pane"),
        ("?", "Toggle help"),
        ("q", "Quit"),
    ];
    let mut text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    text.extend(keys.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("{key:<12}"), Color::Cyan),
            Span::raw(*action),
        ])
    }));

    let p = Paragraph::new(text).wrap(Wrap { trim: true });
    f.render_widget(p, inner_area);
}

fn render_tiles(f: &mut Frame, tiles: &[Tile], area: Rect) {
    if tiles.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = tiles
        .iter()
        .map(|_| Constraint::Ratio(1, tiles.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (tile, cell) in tiles.iter().zip(cells.iter()) {
        let line = Line::from(vec![
            Span::styled(
                tile.value.clone(),
                Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(tile.label.clone(), Style::default().fg(theme::MUTED)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(p, *cell);
    }
}

/// Overdue rows shown on the overview; longer lists are clipped.
const OVERDUE_ROWS_MAX: usize = 8;

fn render_overview(f: &mut Frame, app: &App, area: Rect) {
    let overview = Overview::build(&app.catalog, app.today, DEFAULT_RECENT_LIMIT);
    let overdue_rows = overview
        .overdue_non_conformances
        .len()
        .clamp(1, OVERDUE_ROWS_MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(overdue_rows as u16 + 2),
        ])
        .split(area);
    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let tiles = overview.tiles;
    render_tiles(
        f,
        &[
            Tile::new(
                "Active Documents",
                tiles.active_documents,
                theme::status_color(Domain::Documents, "active"),
            ),
            Tile::new(
                "Completed Audits",
                tiles.completed_audits,
                theme::status_color(Domain::Audits, "completed"),
            ),
            Tile::new(
                "Training Sessions",
                tiles.training_sessions,
                theme::status_color(Domain::Training, "scheduled"),
            ),
            Tile::new(
                "Open NCs",
                tiles.open_non_conformances,
                theme::status_color(Domain::NonConformance, "open"),
            ),
        ],
        chunks[0],
    );

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(panels[0]);

    let mut activity: Vec<Line> = overview
        .recent_activity
        .iter()
        .map(|event| {
            Line::from(vec![
                Span::styled(
                    format!("{:<13}", event.relative_time()),
                    Style::default().fg(theme::MUTED),
                ),
                Span::raw(event.title.to_string()),
                Span::styled(
                    format!("  {}", event.status_label),
                    Style::default().fg(theme::status_color(event.domain, event.status)),
                ),
            ])
        })
        .collect();
    if activity.is_empty() {
        activity.push(muted_line("No activity yet."));
    }
    f.render_widget(
        Paragraph::new(activity)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Recent Activity")),
        top[0],
    );

    let mut tasks: Vec<Line> = overview
        .upcoming_tasks
        .iter()
        .map(|task| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", task.due_date),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::raw(task.title.clone()),
                Span::styled(
                    format!("  {}", task.priority.label()),
                    Style::default().fg(theme::priority_color(task.priority.as_str())),
                ),
            ])
        })
        .collect();
    if tasks.is_empty() {
        tasks.push(muted_line("No tasks due."));
    }
    f.render_widget(
        Paragraph::new(tasks)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Upcoming Tasks")),
        top[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(panels[1]);

    let mut upcoming: Vec<Line> = overview
        .upcoming_training
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.session.scheduled_date),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::raw(entry.session.title.clone()),
                Span::styled(
                    format!("  {} spots", entry.spots_available),
                    Style::default().fg(theme::MUTED),
                ),
            ])
        })
        .collect();
    if upcoming.is_empty() {
        upcoming.push(muted_line("No sessions scheduled."));
    }
    f.render_widget(
        Paragraph::new(upcoming)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Upcoming Training")),
        columns[0],
    );

    let mut recent: Vec<Line> = overview
        .recent_non_conformances
        .iter()
        .map(|nc| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", nc.id),
                    Style::default().fg(theme::severity_color(nc.severity.as_str())),
                ),
                Span::raw(nc.title.clone()),
                Span::styled(
                    format!("  {}", nc.status.label()),
                    Style::default().fg(theme::nc_status_color(nc.status.as_str())),
                ),
            ])
        })
        .collect();
    if recent.is_empty() {
        recent.push(muted_line("No reports."));
    }
    f.render_widget(
        Paragraph::new(recent)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Recent Non-Conformances"),
            ),
        columns[1],
    );

    let overdue = &overview.overdue_non_conformances;
    let (lines, border) = if overdue.is_empty() {
        (vec![muted_line("Nothing overdue.")], Style::default())
    } else {
        let lines = overdue
            .iter()
            .map(|nc| {
                Line::from(vec![
                    Span::styled(format!("{} ", icons::OVERDUE), theme::severity_color("critical")),
                    Span::raw(format!("{} {}", nc.id, nc.title)),
                    Span::styled(
                        format!("  due {}", nc.due_date),
                        Style::default().fg(theme::MUTED),
                    ),
                ])
            })
            .collect();
        (lines, Style::default().fg(theme::severity_color("critical")))
    };
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Overdue Non-Conformances")
                .border_style(border),
        ),
        chunks[2],
    );
}

fn render_domain(f: &mut Frame, app: &mut App, domain: Domain, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    render_query_bar(f, app, domain, chunks[0]);
    render_tiles(f, &domain_tiles(app, domain), chunks[1]);
    render_table(f, app, domain, chunks[2]);
}

fn render_query_bar(f: &mut Frame, app: &App, domain: Domain, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(area);

    let view = app.view(domain);
    let searching = app.input_mode == InputMode::Search;
    let line = if searching {
        Line::from(vec![
            Span::raw(view.search.clone()),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ])
    } else if view.search.is_empty() {
        muted_line(search_hint(domain))
    } else {
        Line::from(view.search.clone())
    };
    let border = if searching {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search [/]")
                .border_style(border),
        ),
        columns[0],
    );

    let label = app.active_filter(domain).map_or("All", |option| option.label);
    let title = format!("Filter: {} [f]", filter_field(app, domain));
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(theme::ACCENT),
        )))
        .block(Block::default().borders(Borders::ALL).title(title)),
        columns[1],
    );
}

fn search_hint(domain: Domain) -> &'static str {
    match domain {
        Domain::Documents => "Search documents...",
        Domain::Audits => "Search audits...",
        Domain::Training => "Search training...",
        Domain::NonConformance => "Search non-conformances...",
    }
}

fn filter_field(app: &App, domain: Domain) -> &'static str {
    match domain {
        Domain::Documents => app.catalog.documents.schema().filter.field,
        Domain::Audits => app.catalog.audits.schema().filter.field,
        Domain::Training => app.catalog.training.schema().filter.field,
        Domain::NonConformance => app.catalog.non_conformances.schema().filter.field,
    }
}

fn tally_tiles(domain: Domain, tally: &StatusTally) -> Vec<Tile> {
    tally
        .iter()
        .map(|entry| {
            Tile::new(
                entry.label,
                entry.count,
                theme::status_color(domain, entry.status),
            )
        })
        .collect()
}

fn domain_tiles(app: &App, domain: Domain) -> Vec<Tile> {
    let catalog = &app.catalog;
    match domain {
        Domain::Documents => {
            let mut tiles = vec![Tile::new("Total", catalog.documents.len(), theme::ACCENT)];
            tiles.extend(tally_tiles(Domain::Documents, &catalog.documents.tally()));
            tiles
        }
        Domain::Audits => {
            let summary = AuditSummary::from_store(&catalog.audits);
            let mut tiles = tally_tiles(Domain::Audits, &catalog.audits.tally());
            tiles.push(Tile::new(
                "Non-Conformances",
                summary.total_non_conformances,
                theme::severity_color("major"),
            ));
            tiles
        }
        Domain::Training => {
            let summary = TrainingSummary::from_store(&catalog.training);
            let mut tiles = tally_tiles(Domain::Training, &catalog.training.tally());
            tiles.push(Tile::new("Attendees", summary.total_attendees, theme::ACCENT));
            tiles
        }
        Domain::NonConformance => {
            let summary = NonConformanceSummary::from_store(&catalog.non_conformances, app.today);
            let mut tiles = tally_tiles(Domain::NonConformance, &catalog.non_conformances.tally());
            let color = if summary.overdue > 0 {
                theme::severity_color("critical")
            } else {
                theme::MUTED
            };
            tiles.push(Tile::new("Overdue", summary.overdue, color));
            tiles
        }
    }
}

fn render_table(f: &mut Frame, app: &mut App, domain: Domain, area: Rect) {
    let positions = app.view(domain).rows.clone();
    let catalog = &app.catalog;
    let (header, widths, rows) = match domain {
        Domain::Documents => document_table(catalog.documents.records(), &positions),
        Domain::Audits => audit_table(catalog.audits.records(), &positions),
        Domain::Training => training_table(catalog.training.records(), &positions),
        Domain::NonConformance => {
            nc_table(catalog.non_conformances.records(), &positions, app.today)
        }
    };

    let title = format!(
        "{} ({} of {})",
        domain.label(),
        positions.len(),
        catalog.len_of(domain)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if rows.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let text = vec![
            Line::from(Span::styled("No matching records", Color::Yellow)),
            Line::from(""),
            muted_line("Press / to change the search or f to change the filter."),
        ];
        f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        return;
    }

    let table = Table::new(rows, widths)
        .header(header.style(theme::HEADER_STYLE))
        .block(block)
        .highlight_style(theme::SELECTED_STYLE);

    f.render_stateful_widget(table, area, &mut app.view_mut(domain).table_state);
}

type TableParts = (Row<'static>, Vec<Constraint>, Vec<Row<'static>>);

fn badge<C: Choice>(value: C, color: fn(&str) -> Color) -> Cell<'static> {
    Cell::from(Span::styled(
        value.label(),
        Style::default().fg(color(value.as_str())),
    ))
}

fn selected<'a, R>(records: &'a [R], positions: &'a [usize]) -> impl Iterator<Item = &'a R> {
    positions.iter().filter_map(|&idx| records.get(idx))
}

fn document_table(records: &[Document], positions: &[usize]) -> TableParts {
    let header = Row::new(vec![
        "ID", "Title", "Category", "Version", "Modified", "By", "Status", "Size",
    ]);
    let widths = vec![
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(7),
    ];
    let rows = selected(records, positions)
        .enumerate()
        .map(|(visual_idx, doc)| {
            Row::new(vec![
                Cell::from(doc.id.to_string()),
                Cell::from(doc.title.clone()),
                badge(doc.category, theme::document_category_color),
                Cell::from(format!("v{}", doc.version)),
                Cell::from(doc.last_modified.to_string()),
                Cell::from(doc.modified_by.clone()),
                badge(doc.status, theme::document_status_color),
                Cell::from(doc.size.clone()),
            ])
            .style(theme::zebra_row_style(visual_idx))
        })
        .collect();
    (header, widths, rows)
}

fn audit_table(records: &[Audit], positions: &[usize]) -> TableParts {
    let header = Row::new(vec![
        "ID", "Title", "Type", "Auditor", "Date", "Findings", "NCs", "Status",
    ]);
    let widths = vec![
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(4),
        Constraint::Length(11),
    ];
    let rows = selected(records, positions)
        .enumerate()
        .map(|(visual_idx, audit)| {
            Row::new(vec![
                Cell::from(audit.id.to_string()),
                Cell::from(audit.title.clone()),
                badge(audit.audit_type, theme::audit_type_color),
                Cell::from(audit.auditor.clone()),
                Cell::from(audit.display_date().to_string()),
                Cell::from(audit.findings.to_string()),
                Cell::from(audit.non_conformances.to_string()),
                badge(audit.status, theme::schedule_status_color),
            ])
            .style(theme::zebra_row_style(visual_idx))
        })
        .collect();
    (header, widths, rows)
}

fn training_table(records: &[TrainingSession], positions: &[usize]) -> TableParts {
    let header = Row::new(vec![
        "ID",
        "Title",
        "Instructor",
        "Date",
        "Hours",
        "Attendees",
        "Done",
        "Status",
    ]);
    let widths = vec![
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Length(5),
        Constraint::Length(11),
    ];
    let rows = selected(records, positions)
        .enumerate()
        .map(|(visual_idx, session)| {
            Row::new(vec![
                Cell::from(session.id.to_string()),
                Cell::from(session.title.clone()),
                Cell::from(session.instructor.clone()),
                Cell::from(session.scheduled_date.to_string()),
                Cell::from(format!("{}h", session.duration_hours)),
                Cell::from(format!("{}/{}", session.attendees, session.max_attendees)),
                Cell::from(format!("{}%", session.completion_rate)),
                badge(session.status, theme::schedule_status_color),
            ])
            .style(theme::zebra_row_style(visual_idx))
        })
        .collect();
    (header, widths, rows)
}

fn nc_table(records: &[NonConformance], positions: &[usize], today: NaiveDate) -> TableParts {
    let header = Row::new(vec![
        "", "ID", "Title", "Severity", "Category", "Assigned", "Due", "Status",
    ]);
    let widths = vec![
        Constraint::Length(1),
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(13),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(11),
    ];
    let rows = selected(records, positions)
        .enumerate()
        .map(|(visual_idx, nc)| {
            let (marker, due_style) = if nc.is_overdue(today) {
                (
                    Span::styled(icons::OVERDUE, theme::severity_color("critical")),
                    Style::default().fg(theme::severity_color("critical")),
                )
            } else {
                (Span::raw(icons::ON_TRACK), Style::default())
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(nc.id.clone()),
                Cell::from(nc.title.clone()),
                badge(nc.severity, theme::severity_color),
                badge(nc.category, theme::nc_category_color),
                Cell::from(nc.assigned_to.clone()),
                Cell::from(Span::styled(nc.due_date.to_string(), due_style)),
                badge(nc.status, theme::nc_status_color),
            ])
            .style(theme::zebra_row_style(visual_idx))
        })
        .collect();
    (header, widths, rows)
}

fn render_details(f: &mut Frame, app: &App, domain: Domain, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let catalog = &app.catalog;
    let lines = app.selected_position(domain).and_then(|idx| match domain {
        Domain::Documents => catalog.documents.records().get(idx).map(document_details),
        Domain::Audits => catalog.audits.records().get(idx).map(audit_details),
        Domain::Training => catalog.training.records().get(idx).map(training_details),
        Domain::NonConformance => catalog
            .non_conformances
            .records()
            .get(idx)
            .map(|nc| nc_details(nc, app.today)),
    });
    let lines = lines.unwrap_or_else(|| vec![muted_line("No record selected.")]);

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner_area);
}

fn muted_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn heading_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn field_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.into()),
    ])
}

fn badge_line<C: Choice>(label: &str, value: C, color: fn(&str) -> Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.label(), Style::default().fg(color(value.as_str()))),
    ])
}

fn document_details(doc: &Document) -> Vec<Line<'static>> {
    vec![
        heading_line(&doc.title),
        Line::from(""),
        field_line("ID", doc.id.to_string()),
        field_line("Version", doc.version.clone()),
        badge_line("Category", doc.category, theme::document_category_color),
        badge_line("Status", doc.status, theme::document_status_color),
        field_line("Last Modified", doc.last_modified.to_string()),
        field_line("Modified By", doc.modified_by.clone()),
        field_line("Size", doc.size.clone()),
    ]
}

fn audit_details(audit: &Audit) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading_line(&audit.title),
        Line::from(""),
        badge_line("Type", audit.audit_type, theme::audit_type_color),
        badge_line("Status", audit.status, theme::schedule_status_color),
        field_line("Auditor", audit.auditor.clone()),
        field_line("Scheduled", audit.scheduled_date.to_string()),
    ];
    if let Some(completed) = audit.completed_date {
        lines.push(field_line("Completed", completed.to_string()));
    }
    lines.push(field_line("Findings", audit.findings.to_string()));
    lines.push(field_line(
        "Non-Conformances",
        audit.non_conformances.to_string(),
    ));
    lines
}

fn training_details(session: &TrainingSession) -> Vec<Line<'static>> {
    vec![
        heading_line(&session.title),
        Line::from(""),
        badge_line("Status", session.status, theme::schedule_status_color),
        field_line("Instructor", session.instructor.clone()),
        field_line("Date", session.scheduled_date.to_string()),
        field_line("Duration", format!("{} hours", session.duration_hours)),
        field_line(
            "Attendees",
            format!("{}/{}", session.attendees, session.max_attendees),
        ),
        field_line("Spots Available", session.spots_available().to_string()),
        field_line("Completion", format!("{}%", session.completion_rate)),
    ]
}

fn nc_details(nc: &NonConformance, today: NaiveDate) -> Vec<Line<'static>> {
    let mut due = vec![
        Span::styled("Due: ", Style::default().fg(Color::DarkGray)),
        Span::raw(nc.due_date.to_string()),
    ];
    if nc.is_overdue(today) {
        due.push(Span::styled(
            " (overdue)",
            Style::default()
                .fg(theme::severity_color("critical"))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![
        heading_line(&nc.title),
        field_line("ID", nc.id.clone()),
        Line::from(""),
        badge_line("Severity", nc.severity, theme::severity_color),
        badge_line("Status", nc.status, theme::nc_status_color),
        badge_line("Category", nc.category, theme::nc_category_color),
        field_line(
            "Reported",
            format!("{} by {}", nc.reported_date, nc.reported_by),
        ),
        field_line("Assigned To", nc.assigned_to.clone()),
        Line::from(due),
        Line::from(""),
        Line::from(Span::styled(
            "Description:",
            Style::default().fg(Color::Blue),
        )),
    ];
    if nc.description.is_empty() {
        lines.push(muted_line("No description."));
    } else {
        lines.push(Line::from(nc.description.clone()));
    }
    if !nc.root_cause.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Root Cause:",
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(nc.root_cause.clone()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use qms_core::Catalog;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 26).expect("valid date");
        App::new(Catalog::seeded(), Some(today))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(150, 32);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn overview_renders_tiles_and_lists() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("1 Dashboard"));
        assert!(screen.contains("Active Documents"));
        assert!(screen.contains("Internal Auditor Training"));
        assert!(screen.contains("Recent Non-Conformances"));
        assert!(screen.contains("NC-2024-005 Product Dimension Out of Tolerance"));
        assert!(screen.contains("Today 2024-01-26"));
        assert!(screen.contains("Recent Activity"));
        assert!(screen.contains("Supplier Audit - ABC Manufacturing"));
        assert!(screen.contains("1 day ago"));
        assert!(screen.contains("Upcoming Tasks"));
        assert!(screen.contains("2024-01-15 Quarterly Management Review  High"));
    }

    #[test]
    fn long_overdue_list_keeps_panels_visible() {
        let mut snapshot = Catalog::seeded().snapshot();
        let template = snapshot.non_conformances[0].clone();
        snapshot.non_conformances = (0..200)
            .map(|idx| {
                let mut nc = template.clone();
                nc.id = format!("NC-9{idx:03}");
                nc
            })
            .collect();
        let catalog = Catalog::from_snapshot(snapshot).expect("valid snapshot");
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let mut app = App::new(catalog, Some(today));
        let screen = draw(&mut app);
        assert!(screen.contains("Active Documents"));
        assert!(screen.contains("Recent Activity"));
        assert!(screen.contains("Overdue Non-Conformances"));
        assert!(screen.contains("NC-9000"));
    }

    #[test]
    fn document_screen_shows_search_results() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        for ch in "quality".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        let screen = draw(&mut app);
        assert!(screen.contains("Quality Manual"));
        assert!(!screen.contains("Internal Audit Checklist"));
        assert!(screen.contains("Document Control (1 of 5)"));
        assert!(screen.contains("Filter: category [f]"));
        assert!(screen.contains("SEARCH"));
    }

    #[test]
    fn empty_result_shows_hint() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        for ch in "zzz".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        let screen = draw(&mut app);
        assert!(screen.contains("No matching records"));
        assert!(screen.contains("Audit Management (0 of 5)"));
    }

    #[test]
    fn non_conformance_details_show_overdue_state() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let screen = draw(&mut app);
        assert!(screen.contains("Details"));
        assert!(screen.contains("Process Documentation Missing"));
        assert!(screen.contains("(overdue)"));
        assert!(screen.contains("Root Cause:"));
        assert!(screen.contains("Overdue"));
    }

    #[test]
    fn help_pane_lists_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        let screen = draw(&mut app);
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(screen.contains("Cycle filter"));
    }

    #[test]
    fn training_tiles_include_attendee_total() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        let screen = draw(&mut app);
        assert!(screen.contains("50 Attendees"));
        assert!(screen.contains("2 Scheduled"));
    }
}
