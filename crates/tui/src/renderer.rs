use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use reel_core::{CarouselController, StripConfig, StripGeometry};
use reel_protocol::{
    CarouselFrame, HostRequest, IndicatorView, IntroPhase, PlacementMode, SlotIndex, StripView,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::sim::{ClipEvent, FailSwitch, PX_PER_COL, PX_PER_ROW, Page, SimulatedMedia};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const WHEEL_STEP_PX: f64 = 3.0 * PX_PER_ROW;

type Controller = CarouselController<SimulatedMedia>;

pub fn run(mut controller: Controller, fail: &FailSwitch) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut controller, fail);
    controller.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn cols_px(cols: u16) -> f64 {
    f64::from(cols) * PX_PER_COL
}

fn rows_px(rows: u16) -> f64 {
    f64::from(rows) * PX_PER_ROW
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    fail: &FailSwitch,
) -> Result<()> {
    let started = Instant::now();
    let mut last_tick = started;
    let mut page = Page::new(0.0, 0.0, controller.layout().container_height());
    let mut measured_width = None;
    let mut strip_scroll = 0.0;
    let mut scrolled = true;

    loop {
        let tick = Instant::now();
        let now = u64::try_from(tick.duration_since(started).as_millis()).unwrap_or(u64::MAX);
        let dt = tick.duration_since(last_tick).as_secs_f64();
        last_tick = tick;

        let size = terminal.size()?;
        let viewport_rows = size.height.saturating_sub(1);
        if measured_width != Some((size.width, viewport_rows)) {
            measured_width = Some((size.width, viewport_rows));
            page.resize(cols_px(size.width), rows_px(viewport_rows));
            let card_width = controller.layout().metrics().card_width;
            let gap = controller.config().gap;
            controller.set_strip_geometry(StripGeometry::uniform(
                card_width,
                gap,
                page.viewport_width,
            ));
            scrolled = true;
        }
        if scrolled {
            controller.on_viewport(&page.sample(), now);
            scrolled = false;
        }

        let clip_events: Vec<(SlotIndex, ClipEvent)> = controller
            .handles_mut()
            .iter_mut()
            .filter_map(|(slot, clip)| clip.tick(dt).map(|event| (slot, event)))
            .collect();
        for (slot, event) in clip_events {
            match event {
                ClipEvent::Started => controller.on_playing(slot, now),
                ClipEvent::Ended => controller.on_media_ended(slot, now),
            }
        }
        if controller.wants_frames() {
            controller.on_animation_frame(now);
        }
        controller.advance(now);

        for request in controller.drain_requests() {
            let HostRequest::ScrollStrip { offset, reason } = request;
            tracing::debug!(offset, ?reason, "scrolling card strip");
            strip_scroll = offset;
        }

        let scene = Scene {
            frame: controller.frame(),
            playing: controller.playing_slots(),
            page: &page,
            strip: &controller.config().strip,
            card_width: controller.layout().metrics().card_width,
            card_height: controller.layout().metrics().card_height,
            pitch: controller.layout().spread_pitch(),
            strip_scroll,
            fail_armed: fail.is_armed(),
        };
        terminal.draw(|f| draw(f, &scene))?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up => {
                    page.scroll_by(-WHEEL_STEP_PX);
                    scrolled = true;
                }
                KeyCode::Down => {
                    page.scroll_by(WHEEL_STEP_PX);
                    scrolled = true;
                }
                KeyCode::PageUp => {
                    page.scroll_by(-0.9 * page.viewport_height);
                    scrolled = true;
                }
                KeyCode::PageDown => {
                    page.scroll_by(0.9 * page.viewport_height);
                    scrolled = true;
                }
                KeyCode::Char(' ') => controller.on_container_tap(now),
                KeyCode::Char('f') => fail.arm(),
                KeyCode::Char(c) => {
                    let slot = c
                        .to_digit(10)
                        .and_then(|d| (d as usize).checked_sub(1))
                        .and_then(SlotIndex::new);
                    if let Some(slot) = slot {
                        controller.on_indicator_tap(slot, now);
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    page.scroll_by(WHEEL_STEP_PX);
                    scrolled = true;
                }
                MouseEventKind::ScrollUp => {
                    page.scroll_by(-WHEEL_STEP_PX);
                    scrolled = true;
                }
                _ => {}
            },
            Event::Resize(..) => measured_width = None,
            _ => {}
        }
    }

    Ok(())
}

/// Everything one draw call needs, captured after the controller settled.
struct Scene<'a> {
    frame: CarouselFrame,
    playing: Vec<SlotIndex>,
    page: &'a Page,
    strip: &'a StripConfig,
    card_width: f64,
    card_height: f64,
    pitch: f64,
    strip_scroll: f64,
    fail_armed: bool,
}

/// Intersect a rectangle given in fractional cells with `bounds`.
fn clip_cells(x: f64, y: f64, w: f64, h: f64, bounds: Rect) -> Option<Rect> {
    let left = x.round().max(f64::from(bounds.x));
    let top = y.round().max(f64::from(bounds.y));
    let right = (x + w).round().min(f64::from(bounds.right()));
    let bottom = (y + h).round().min(f64::from(bounds.bottom()));
    if right - left < 1.0 || bottom - top < 1.0 {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn draw(f: &mut Frame, scene: &Scene) {
    let area = f.area();
    let header_area = Rect::new(area.x, area.y, area.width, 1.min(area.height));
    let content = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    );

    let header_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    f.render_widget(Paragraph::new(header_text(scene)).style(header_style), header_area);
    f.render_widget(Block::default().style(Style::default().bg(Color::Black)), content);

    draw_page_markers(f, scene, content);
    draw_cards(f, scene, content);

    let strip = &scene.frame.strip;
    let active = scene.frame.playback.active;
    if strip.fixed_visible {
        let top = scene.page.viewport_height
            - scene.strip.bottom_offset
            - scene.strip.controller_height;
        draw_strip(f, strip, active, top, content, Color::Blue);
    }
    if strip.anchor_visible {
        let top = scene.page.anchor().top() + scene.strip.anchor_padding;
        draw_strip(f, strip, active, top, content, Color::DarkGray);
    }
}

fn header_text(scene: &Scene) -> String {
    let frame = &scene.frame;
    format!(
        " reel | {:?} | {} | slot {} {:>3.0}% | {:?} | {:?}{} | ↑↓ PgUp PgDn scroll · 1-5 select · space toggle · f fail next · q quit ",
        frame.visibility,
        if frame.expanded { "expanded" } else { "collapsed" },
        frame.playback.active.label(),
        frame.playback.progress * 100.0,
        frame.strip.phase,
        frame.strip.placement,
        if scene.fail_armed { " | next play fails" } else { "" },
    )
}

fn draw_page_markers(f: &mut Frame, scene: &Scene, content: Rect) {
    let page = scene.page;
    let markers = [
        (page.viewport_height - page.scroll(), "↓ keep scrolling ↓"),
        (page.height() - page.viewport_height / 2.0 - page.scroll(), "end of page"),
    ];
    for (top_px, text) in markers {
        let y = f64::from(content.y) + top_px / PX_PER_ROW;
        if let Some(rect) = clip_cells(0.0, y, f64::from(content.width), 1.0, content) {
            f.render_widget(
                Paragraph::new(text)
                    .centered()
                    .style(Style::default().fg(Color::DarkGray)),
                rect,
            );
        }
    }
}

fn draw_cards(f: &mut Frame, scene: &Scene, content: Rect) {
    let frame = &scene.frame;
    let viewport_width = scene.page.viewport_width;
    let container_top = scene.page.container().top();
    // Spread positions put slot 1 on the center line; shift the row so it
    // follows the strip's horizontal scroll instead.
    let row_shift = if frame.expanded {
        scene.pitch + scene.card_width / 2.0 - viewport_width / 2.0 - scene.strip_scroll
    } else {
        0.0
    };

    let mut slots: Vec<_> = frame.slots.iter().collect();
    slots.sort_by_key(|slot| slot.transform.z_index);

    for view in slots {
        let t = &view.transform;
        let left_px = viewport_width / 2.0 + t.offset_x + row_shift - scene.card_width / 2.0;
        let top_px = container_top + t.offset_y;
        let Some(rect) = clip_cells(
            f64::from(content.x) + left_px / PX_PER_COL,
            f64::from(content.y) + top_px / PX_PER_ROW,
            scene.card_width / PX_PER_COL,
            scene.card_height / PX_PER_ROW,
            content,
        ) else {
            continue;
        };

        let playing = scene.playing.contains(&view.slot);
        let border = if view.active { Color::Yellow } else { Color::Gray };
        let mut lines = vec![Line::from(view.media.file_name().to_string())];
        if playing {
            lines.push(Line::from(Span::styled(
                "▶ playing",
                Style::default().fg(Color::Green),
            )));
        }
        if t.rotation != 0.0 {
            lines.push(Line::from(format!("tilt {:+.0}°", t.rotation)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", view.label));
        f.render_widget(Clear, rect);
        f.render_widget(Paragraph::new(lines).block(block), rect);
    }
}

fn indicator_span(indicator: &IndicatorView, active: SlotIndex) -> Span<'static> {
    let cols = (indicator.width / PX_PER_COL).round().max(1.0) as usize;
    if indicator.opacity <= 0.0 {
        return Span::raw(" ".repeat(cols));
    }
    let filled = ((indicator.fill * cols as f64).round() as usize).min(cols);
    let text = format!("{}{}", "█".repeat(filled), "░".repeat(cols - filled));
    let style = if indicator.slot == active {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(text, style)
}

fn strip_line(strip: &StripView, active: SlotIndex) -> Line<'static> {
    if strip.phase == IntroPhase::Circle {
        return Line::from("( )");
    }
    let mut spans = vec![Span::raw("( ")];
    for (i, indicator) in strip.indicators.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(indicator_span(indicator, active));
    }
    spans.push(Span::raw(" )"));
    Line::from(spans)
}

fn draw_strip(
    f: &mut Frame,
    strip: &StripView,
    active: SlotIndex,
    top_px: f64,
    content: Rect,
    bg: Color,
) {
    let line = strip_line(strip, active);
    let width = line.width() as f64;
    let x = f64::from(content.x) + (f64::from(content.width) - width) / 2.0;
    let y = f64::from(content.y) + top_px / PX_PER_ROW;
    let Some(rect) = clip_cells(x, y, width, 1.0, content) else {
        return;
    };
    let tag = match strip.placement {
        PlacementMode::Fixed => Style::default().bg(bg),
        PlacementMode::Anchor => Style::default().bg(bg).add_modifier(Modifier::DIM),
    };
    f.render_widget(Paragraph::new(line).style(tag), rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_rejects_offscreen_and_trims_overlap() {
        let bounds = Rect::new(0, 1, 80, 20);
        assert_eq!(clip_cells(-100.0, 5.0, 10.0, 3.0, bounds), None);
        assert_eq!(clip_cells(75.0, 5.0, 10.0, 3.0, bounds), Some(Rect::new(75, 5, 5, 3)));
        assert_eq!(clip_cells(2.0, -2.0, 4.0, 5.0, bounds), Some(Rect::new(2, 1, 4, 2)));
    }

    #[test]
    fn circle_strip_hides_indicators() {
        let config = reel_core::CarouselConfig::default();
        let mut strip = reel_core::views::render_strip(
            &config.strip,
            IntroPhase::Circle,
            PlacementMode::Fixed,
            0.0,
            reel_core::PlaybackState::default(),
        );
        assert_eq!(strip_line(&strip, SlotIndex::FIRST).width(), 3);

        strip.phase = IntroPhase::Visible;
        for indicator in &mut strip.indicators {
            indicator.opacity = 1.0;
        }
        // Active indicator is 4 columns, the rest one each, plus separators.
        assert_eq!(strip_line(&strip, SlotIndex::FIRST).width(), 2 + 4 + 4 + 4 + 2);
    }
}
