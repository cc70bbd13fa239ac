//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::hero::HeroSnapshot;
use crate::sequencer::CursorSlot;
use crate::skills;
use crate::toast::Toast;
use crate::types::{PortfolioData, Section};

use super::state::{App, Screen};
use super::theme;

/// Toasts shown at once; older ones wait off screen until they expire.
const MAX_TOASTS: usize = 4;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(&app.screen), chunks[0]);
    frame.render_widget(render_help(&app.screen), chunks[2]);

    render_screen(app, &app.screen, frame, chunks[1]);
    render_toasts(app.toasts.visible(), frame, chunks[1]);
}

fn render_screen(app: &App, screen: &Screen, frame: &mut Frame, area: Rect) {
    match screen {
        Screen::Hero => render_hero(app, frame, area),
        Screen::Section { section, cursor } => {
            render_section(app, *section, *cursor, frame, area);
        }
        Screen::EasterEgg { previous } => {
            render_screen(app, previous, frame, area);
            render_easter_egg(frame, area);
        }
    }
}

fn render_section(app: &App, section: Section, cursor: usize, frame: &mut Frame, area: Rect) {
    let profile = &app.profile;
    match section {
        Section::Identity => render_identity(profile, frame, area),
        Section::Skills => {
            render_skills(profile, app.skill_level, app.screen_elapsed(), cursor, frame, area);
        }
        Section::Experience => render_experience(profile, cursor, frame, area),
        Section::Projects => render_projects(profile, cursor, frame, area),
        Section::Contact => render_contact(profile, frame, area),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: the section tabs, with the current one highlighted.
fn render_title(screen: &Screen) -> Paragraph<'static> {
    let current = screen.section();
    let mut spans = vec![Span::styled(
        " TERMFOLIO ",
        if current.is_none() { theme::STYLE_TAB_ACTIVE } else { theme::STYLE_TITLE },
    )];
    for section in Section::ALL {
        let label = format!(" {} {} ", section.number(), section.heading());
        let style = if current == Some(section) {
            theme::STYLE_TAB_ACTIVE
        } else {
            theme::STYLE_DIM
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }
    Paragraph::new(Line::from(spans))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Hero => "[Tab] sections  [1-5] jump  [c] copy email  [o] github  [i] linkedin  [x] dismiss  [q] quit",
        Screen::Section { section: Section::Projects, .. } => {
            "[j/k] move  [Enter] open link  [Tab/h/l] sections  [0/Esc] home  [q] quit"
        }
        Screen::Section { section: Section::Contact, .. } => {
            "[Enter] send mail  [c] copy email  [o] github  [i] linkedin  [0/Esc] home  [q] quit"
        }
        Screen::Section { .. } => "[j/k] move  [Tab/h/l] sections  [1-5] jump  [0/Esc] home  [q] quit",
        Screen::EasterEgg { .. } => "[x/Esc] close",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Lines to scroll so the row ending at `cursor_end` stays visible.
fn scroll_offset(cursor_end: usize, visible_height: usize) -> u16 {
    cursor_end.saturating_sub(visible_height) as u16
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
///
/// Rows are split here rather than by `Wrap` so continuation rows keep
/// the indent and `scroll_offset` can count the rows above the cursor.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn cursor_marker(is_cursor: bool) -> Span<'static> {
    if is_cursor {
        Span::styled("  > ", theme::STYLE_ACCENT)
    } else {
        Span::raw("    ")
    }
}

// ============================================================================
// SCREEN: HERO
// ============================================================================

fn render_hero(app: &App, frame: &mut Frame, area: Rect) {
    let handle = app.profile.handle().to_lowercase();
    let window = Block::bordered()
        .border_style(theme::STYLE_BORDER)
        .title(Span::styled(format!(" {}@portfolio ~ ", handle), theme::STYLE_DIM));

    let paragraph = Paragraph::new(hero_lines(&app.hero.snapshot()))
        .block(window)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// The terminal window body for one hero snapshot.
///
/// Each revealed line is a prompt plus command, then its output (when
/// any has been typed), then a spacer. The cursor sits where the
/// snapshot says; a pending line or the idle state get a bare prompt.
pub fn hero_lines(snapshot: &HeroSnapshot) -> Vec<Line<'static>> {
    let cursor = if snapshot.cursor_visible {
        Span::styled("█", theme::STYLE_CURSOR_BLOCK)
    } else {
        Span::raw(" ")
    };
    let prompt = || Span::styled("❯ ", theme::STYLE_SAFE);

    let mut lines = Vec::new();
    for (i, line) in snapshot.state.revealed_lines.iter().enumerate() {
        let mut command = vec![prompt(), Span::styled(line.command.clone(), theme::STYLE_COMMAND)];
        if snapshot.cursor == CursorSlot::Command(i) {
            command.push(cursor.clone());
        }
        lines.push(Line::from(command));

        if !line.output.is_empty() {
            let mut output = vec![Span::raw("  "), Span::styled(line.output.clone(), output_style(i))];
            if snapshot.cursor == CursorSlot::Output(i) {
                output.push(cursor.clone());
            }
            lines.push(Line::from(output));
        }
        lines.push(Line::from(""));
    }

    if matches!(snapshot.cursor, CursorSlot::Placeholder | CursorSlot::Prompt) {
        lines.push(Line::from(vec![prompt(), cursor]));
    }
    lines
}

fn output_style(line: usize) -> Style {
    match line {
        0 => theme::STYLE_NAME,
        1 => theme::STYLE_ROLE,
        2 => theme::STYLE_BIO,
        _ => theme::STYLE_OUTPUT,
    }
}

// ============================================================================
// SCREEN: IDENTITY
// ============================================================================

fn render_identity(profile: &PortfolioData, frame: &mut Frame, area: Rect) {
    let name = if profile.full_name.trim().is_empty() { "UNKNOWN USER" } else { &profile.full_name };
    let title = if profile.title.trim().is_empty() { "SYSTEM OPERATOR" } else { &profile.title };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", name), theme::STYLE_NAME)),
        Line::from(Span::styled(format!("  // {}", title), theme::STYLE_ROLE)),
        Line::from(""),
    ];
    if profile.bio.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No biography data detected in system core.",
            theme::STYLE_DIM,
        )));
    } else {
        for row in wrap_text(&profile.bio, area.width.saturating_sub(4) as usize) {
            lines.push(Line::from(Span::styled(format!("  {}", row), theme::STYLE_BIO)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  {} skills · {} mission logs · {} schematics",
            profile.skills.len(),
            profile.experiences.len(),
            profile.projects.len()
        ),
        theme::STYLE_DIM,
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// SCREEN: SKILLS
// ============================================================================

fn render_skills(
    profile: &PortfolioData,
    level: u8,
    elapsed: Duration,
    cursor: usize,
    frame: &mut Frame,
    area: Rect,
) {
    if profile.skills.is_empty() {
        let empty = Line::from(Span::styled("  AWAITING DATA INPUT...", theme::STYLE_DIM));
        frame.render_widget(Paragraph::new(vec![Line::from(""), empty]), area);
        return;
    }

    let name_width = profile
        .skills
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
        .min(24);
    let bar_width = (area.width as usize).saturating_sub(name_width + 14).clamp(4, 40);

    let lines: Vec<Line> = profile
        .skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let percent = skills::progress(i, level, elapsed);
            let is_cursor = i == cursor;
            let name_style = if is_cursor { theme::STYLE_IMPORTANT } else { Style::new() };
            Line::from(vec![
                cursor_marker(is_cursor),
                Span::styled(format!("{:<width$} ", skill, width = name_width), name_style),
                Span::styled(skills::meter(percent, bar_width), theme::STYLE_PROGRESS),
                Span::styled(format!(" {:>3}%", percent), theme::STYLE_INTERACTIVE),
            ])
        })
        .collect();

    let offset = scroll_offset(cursor + 1, area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

// ============================================================================
// SCREEN: EXPERIENCE
// ============================================================================

fn render_experience(profile: &PortfolioData, cursor: usize, frame: &mut Frame, area: Rect) {
    if profile.experiences.is_empty() {
        let empty = Line::from(Span::styled("  NO LOGS FOUND...", theme::STYLE_DIM));
        frame.render_widget(Paragraph::new(vec![Line::from(""), empty]), area);
        return;
    }

    let text_width = area.width.saturating_sub(6) as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_end = 0;

    for (i, exp) in profile.experiences.iter().enumerate() {
        let is_cursor = i == cursor;
        lines.push(Line::from(vec![
            cursor_marker(is_cursor),
            Span::styled(exp.role.clone(), theme::STYLE_IMPORTANT),
            Span::styled(format!(" @ {}", exp.company), theme::STYLE_INTERACTIVE),
        ]));
        lines.push(Line::from(Span::styled(format!("    [{}]", exp.period), theme::STYLE_DIM)));
        for row in wrap_text(&exp.description, text_width) {
            lines.push(Line::from(format!("    {}", row)));
        }
        lines.push(Line::from(""));
        if is_cursor {
            cursor_end = lines.len();
        }
    }

    let offset = scroll_offset(cursor_end, area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

// ============================================================================
// SCREEN: PROJECTS
// ============================================================================

fn render_projects(profile: &PortfolioData, cursor: usize, frame: &mut Frame, area: Rect) {
    if profile.projects.is_empty() {
        let empty = Line::from(Span::styled("  // NO SCHEMATICS UPLOADED //", theme::STYLE_DIM));
        frame.render_widget(Paragraph::new(vec![Line::from(""), empty]), area);
        return;
    }

    let text_width = area.width.saturating_sub(6) as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_end = 0;

    for (i, project) in profile.projects.iter().enumerate() {
        let is_cursor = i == cursor;
        let title_line = Line::from(vec![
            cursor_marker(is_cursor),
            Span::styled(project.title.clone(), theme::STYLE_IMPORTANT),
            Span::styled(format!("  {}", project.role), theme::STYLE_DIM),
        ]);
        lines.push(if is_cursor { title_line.style(theme::STYLE_CURSOR) } else { title_line });

        for row in wrap_text(&project.description, text_width) {
            lines.push(Line::from(format!("    {}", row)));
        }
        if !project.tags.is_empty() {
            let tags: Vec<String> = project.tags.iter().map(|t| format!("[{}]", t)).collect();
            lines.push(Line::from(Span::styled(
                format!("    {}", tags.join(" ")),
                theme::STYLE_WARNING,
            )));
        }
        if let Some(link) = profile.project_link(i) {
            lines.push(Line::from(Span::styled(
                format!("    └─ {}", link),
                theme::STYLE_INTERACTIVE,
            )));
        }
        lines.push(Line::from(""));
        if is_cursor {
            cursor_end = lines.len();
        }
    }

    let offset = scroll_offset(cursor_end, area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

// ============================================================================
// SCREEN: CONTACT
// ============================================================================

fn render_contact(profile: &PortfolioData, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Open for new missions.", theme::STYLE_DIM)),
        Line::from(""),
    ];

    if profile.email.trim().is_empty() {
        lines.push(Line::from(Span::styled("  OFFLINE", theme::STYLE_DANGER)));
    } else {
        lines.push(Line::from(Span::styled(
            format!("  < {} />", profile.email),
            theme::STYLE_ACCENT,
        )));
    }
    lines.push(Line::from(""));

    let links = [("[o] GitHub   ", &profile.github), ("[i] LinkedIn ", &profile.linkedin)];
    for (label, link) in links {
        if let Some(link) = link.as_deref().filter(|l| !l.trim().is_empty()) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", label), theme::STYLE_INTERACTIVE),
                Span::raw(link.to_string()),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// OVERLAYS
// ============================================================================

fn render_easter_egg(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 60, area);
    let block = Block::bordered()
        .border_style(theme::STYLE_ACCENT)
        .title(Span::styled(" ↑↑↓↓←→←→BA ", theme::STYLE_ACCENT));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("KONAMI CODE UNLOCKED!", theme::STYLE_TITLE)),
        Line::from(""),
        Line::from("You found the secret!"),
        Line::from(""),
        Line::from("Thanks for exploring with such attention to detail."),
        Line::from("Let's build something amazing together."),
        Line::from(""),
        Line::from(Span::styled("[x] CLOSE", theme::STYLE_TAB_ACTIVE)),
    ];

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .centered()
            .wrap(Wrap { trim: true }),
        modal,
    );
}

/// Newest toasts stacked in the bottom-right corner of `area`.
fn render_toasts(toasts: &[Toast], frame: &mut Frame, area: Rect) {
    if toasts.is_empty() || area.height == 0 {
        return;
    }
    let shown = &toasts[toasts.len().saturating_sub(MAX_TOASTS)..];
    let lines: Vec<Line> = shown
        .iter()
        .map(|t| {
            Line::from(Span::styled(
                format!(" {} {} ", t.kind.icon(), t.message),
                theme::toast_style(t.kind),
            ))
        })
        .collect();

    let width = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0).min(area.width);
    let height = (lines.len() as u16).min(area.height);
    let rect = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines), rect);
}

/// A rectangle `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::profile;
    use crate::sequencer::{Phase, RevealedLine, SequencerState};
    use crate::toast::ToastKind;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 30);
        Terminal::new(backend).unwrap()
    }

    fn app() -> App {
        App::new(profile::sample(), &Config::default())
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn snapshot(lines: Vec<RevealedLine>, phase: Phase, line_index: usize, cursor: CursorSlot) -> HeroSnapshot {
        HeroSnapshot {
            state: SequencerState {
                line_index,
                char_index: 0,
                phase,
                revealed_lines: lines,
            },
            cursor_visible: true,
            cursor,
        }
    }

    // -- Hero lines --

    #[test]
    fn fresh_hero_shows_placeholder_prompt() {
        let lines = hero_lines(&snapshot(vec![], Phase::TypingCommand, 0, CursorSlot::Placeholder));
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "❯ █");
    }

    #[test]
    fn cursor_follows_command_while_typing() {
        let line = RevealedLine {
            command: "who".into(),
            output: String::new(),
            is_active: true,
        };
        let lines = hero_lines(&snapshot(vec![line], Phase::TypingCommand, 0, CursorSlot::Command(0)));
        assert_eq!(line_text(&lines[0]), "❯ who█");
        // No output row yet, just the spacer.
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn cursor_follows_output_while_typing() {
        let line = RevealedLine {
            command: "whoami".into(),
            output: "Ray".into(),
            is_active: true,
        };
        let lines = hero_lines(&snapshot(vec![line], Phase::TypingOutput, 0, CursorSlot::Output(0)));
        assert_eq!(line_text(&lines[0]), "❯ whoami");
        assert_eq!(line_text(&lines[1]), "  Ray█");
    }

    #[test]
    fn idle_hero_ends_with_prompt() {
        let line = RevealedLine {
            command: "whoami".into(),
            output: "Ray".into(),
            is_active: false,
        };
        let mut snap = snapshot(vec![line], Phase::Idle, 1, CursorSlot::Prompt);
        snap.cursor_visible = false;
        let lines = hero_lines(&snap);
        assert_eq!(line_text(lines.last().unwrap()), "❯  ");
        assert!(!lines.iter().any(|l| line_text(l).contains('█')));
    }

    // -- Helpers --

    #[test]
    fn scroll_offset_keeps_cursor_row_visible() {
        assert_eq!(scroll_offset(5, 10), 0);
        assert_eq!(scroll_offset(10, 10), 0);
        assert_eq!(scroll_offset(14, 10), 4);
    }

    #[test]
    fn wrap_text_respects_width() {
        let rows = wrap_text("the quick brown fox jumps over", 10);
        assert_eq!(rows, vec!["the quick", "brown fox", "jumps over"]);
        assert!(wrap_text("", 10).is_empty());
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x >= 20 && centered.x <= 30);
        assert!(centered.width <= 55);
    }

    // -- Full frames --

    #[test]
    fn all_screens_render_without_panic() {
        let mut terminal = make_terminal();
        let mut app = app();
        let mut screens = vec![Screen::Hero];
        for section in Section::ALL {
            screens.push(Screen::section_view(section));
            screens.push(Screen::Section { section, cursor: 3 });
        }
        screens.push(Screen::EasterEgg { previous: Box::new(Screen::Hero) });
        for screen in screens {
            app.screen = screen;
            terminal
                .draw(|frame| render(&app, frame))
                .expect("every screen should render without panic");
        }
    }

    #[test]
    fn empty_profile_renders_placeholders() {
        let mut terminal = make_terminal();
        let mut app = App::new(PortfolioData::default(), &Config::default());
        for (section, text) in [
            (Section::Identity, "UNKNOWN USER"),
            (Section::Skills, "AWAITING DATA INPUT"),
            (Section::Experience, "NO LOGS FOUND"),
            (Section::Projects, "NO SCHEMATICS UPLOADED"),
            (Section::Contact, "OFFLINE"),
        ] {
            app.screen = Screen::section_view(section);
            terminal.draw(|frame| render(&app, frame)).unwrap();
            assert!(screen_text(&terminal).contains(text), "{:?} should show {}", section, text);
        }
    }

    #[test]
    fn hero_window_shows_typed_text() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.tick(Duration::from_secs(30));
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let content = screen_text(&terminal);
        assert!(content.contains("rayhan@portfolio"));
        assert!(content.contains("whoami"));
        assert!(content.contains("Rayhan Yoshara"));
        assert!(content.contains("// Software Developer"));
    }

    #[test]
    fn skills_screen_shows_full_meters_once_settled() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.set_screen(Screen::section_view(Section::Skills));
        app.tick(Duration::from_secs(5));
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let content = screen_text(&terminal);
        assert!(content.contains("85%"));
        assert!(!content.contains("  0%"));
    }

    #[test]
    fn toasts_render_over_content() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.notify(ToastKind::Success, "Email copied");
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(screen_text(&terminal).contains("Email copied"));
    }

    #[test]
    fn easter_egg_modal_renders() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.screen = Screen::EasterEgg {
            previous: Box::new(Screen::section_view(Section::Contact)),
        };
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let content = screen_text(&terminal);
        assert!(content.contains("KONAMI CODE UNLOCKED!"));
        assert!(content.contains("[x] CLOSE"));
    }

    #[test]
    fn title_and_help_render_for_each_screen_variant() {
        let mut screens = vec![Screen::Hero, Screen::EasterEgg { previous: Box::new(Screen::Hero) }];
        screens.extend(Section::ALL.into_iter().map(Screen::section_view));
        for screen in &screens {
            let _ = render_title(screen);
            let _ = render_help(screen);
        }
    }
}
