//! JSON 编辑器演示
//!
//! 使用 crossterm 和 ratatui 构建的终端 JSON 编辑器，演示如何把
//! `jsonpad-core` + `jsonpad-highlight` 作为受控组件嵌入宿主程序：
//! 宿主持有权威文本，组件通过变更回调提议完整的替换文本。
//!
//! # 用法
//!
//! ```bash
//! cargo run -p tui-jsonpad -- <file_path> [--read-only]
//! ```
//!
//! 可选环境变量：
//!
//! - `JSONPAD_HEIGHT`：非全屏状态下编辑器的行数提示（默认 20）
//!
//! # 快捷键
//!
//! - 方向键 / Home / End / PageUp / PageDown: 移动光标
//! - Tab: 插入两个空格
//! - Ctrl+F: 打开搜索（Enter 下一个，Shift+Enter 上一个，Esc 关闭）
//! - F3 / Shift+F3: 查找下一个 / 上一个
//! - Alt+F: 格式化（2 空格缩进）
//! - Alt+M: 压缩（去除空白）
//! - Alt+E: 切换全屏
//! - Ctrl+S: 保存文件
//! - Ctrl+X: 退出

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use jsonpad_core::{
    ChangeSource, JsonEditor, SearchKey, SearchOutcome, Selection, ValueChange, edit, layout,
};
use jsonpad_highlight::{HighlightSpan, SpanStyle, TokenKind, compose};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env, fs,
    io::{self, stdout},
    path::PathBuf,
    process,
    sync::mpsc,
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
}

/// 应用状态
struct App {
    /// 组件内核（派生状态：行索引、校验、搜索、滚动）
    editor: JsonEditor,
    /// 组件提议的变更（宿主逐条应用）
    changes: mpsc::Receiver<ValueChange>,
    /// 宿主持有的权威文本
    text: String,
    /// 光标（字符偏移）
    caret: usize,
    /// 文件路径
    file_path: PathBuf,
    /// 是否有未保存修改
    dirty: bool,
    /// 是否需要退出
    should_quit: bool,
    /// 确认退出模式（如果有未保存修改）
    confirm_quit: bool,
    /// 状态消息
    status_message: String,
    /// 当前输入模式（Normal/Search）
    input_mode: InputMode,
    /// 文本视口内侧高度（行）
    viewport_height: usize,
    /// 文本视口内侧宽度（列）
    viewport_width: usize,
}

impl App {
    fn new(file_path: PathBuf, read_only: bool) -> io::Result<Self> {
        let text = if file_path.exists() {
            fs::read_to_string(&file_path)?
        } else {
            String::new()
        };

        let mut editor = JsonEditor::new(&text);
        editor.set_read_only(read_only);
        if let Ok(rows) = env::var("JSONPAD_HEIGHT") {
            if let Ok(rows) = rows.parse::<usize>() {
                editor.set_height_hint(rows);
            }
        }

        let (tx, rx) = mpsc::channel();
        editor.subscribe(move |change| {
            let _ = tx.send(change.clone());
        });

        Ok(Self {
            editor,
            changes: rx,
            text,
            caret: 0,
            file_path,
            dirty: false,
            should_quit: false,
            confirm_quit: false,
            status_message: String::new(),
            input_mode: InputMode::Normal,
            viewport_height: 0,
            viewport_width: 0,
        })
    }

    /// 应用组件提议的所有变更（宿主的 value/onChange 回路）
    fn apply_pending_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            self.text = change.text;
            self.editor.set_value(&self.text);
            self.dirty = true;
            match change.source {
                ChangeSource::Format => self.status_message = "已格式化".to_string(),
                ChangeSource::Minify => self.status_message = "已压缩".to_string(),
                ChangeSource::Edit | ChangeSource::Indent => {}
            }
        }
        let char_count = self.editor.line_index().char_count();
        self.caret = self.caret.min(char_count);
    }

    fn save_file(&mut self) -> io::Result<()> {
        fs::write(&self.file_path, &self.text)?;
        self.dirty = false;
        Ok(())
    }

    // ---- 按键处理 ---------------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // 确认退出模式
        if self.confirm_quit {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if let Err(e) = self.save_file() {
                        self.status_message = format!("保存失败: {}", e);
                        self.confirm_quit = false;
                    } else {
                        self.should_quit = true;
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.confirm_quit = false;
                    self.status_message.clear();
                }
                _ => {}
            }
            return;
        }

        if self.input_mode == InputMode::Search {
            self.handle_search_prompt_key(key);
            return;
        }

        match (key.modifiers, key.code) {
            // Ctrl+S: 保存
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                if let Err(e) = self.save_file() {
                    self.status_message = format!("保存失败: {}", e);
                } else {
                    self.status_message = format!("已保存: {}", self.file_path.display());
                }
            }
            // Ctrl+X: 退出
            (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
                if self.dirty {
                    self.confirm_quit = true;
                    self.status_message = "有未保存修改，保存后退出？(Y/N/Esc)".to_string();
                } else {
                    self.should_quit = true;
                }
            }
            // Ctrl+F: 打开搜索
            (KeyModifiers::CONTROL, KeyCode::Char('f')) => {
                self.editor.find_shortcut();
                self.input_mode = InputMode::Search;
                self.status_message.clear();
            }
            // F3 / Shift+F3: 查找下一个 / 上一个
            (KeyModifiers::NONE, KeyCode::F(3)) => self.find_next(),
            (KeyModifiers::SHIFT, KeyCode::F(3)) => self.find_prev(),
            // Alt+F / Alt+M: 格式化 / 压缩
            (mods, KeyCode::Char('f' | 'F')) if mods.contains(KeyModifiers::ALT) => {
                if self.editor.read_only() {
                    self.status_message = "只读模式".to_string();
                } else if self.editor.format() {
                    self.apply_pending_changes();
                } else {
                    self.status_message = "格式化失败：JSON 无效".to_string();
                }
            }
            (mods, KeyCode::Char('m' | 'M')) if mods.contains(KeyModifiers::ALT) => {
                if self.editor.read_only() {
                    self.status_message = "只读模式".to_string();
                } else if self.editor.minify() {
                    self.apply_pending_changes();
                } else {
                    self.status_message = "压缩失败：JSON 无效".to_string();
                }
            }
            // Alt+E: 切换全屏
            (mods, KeyCode::Char('e' | 'E')) if mods.contains(KeyModifiers::ALT) => {
                self.editor.toggle_expanded();
            }
            // Tab: 插入两个空格
            (_, KeyCode::Tab) => self.insert_tab(),
            // 编辑键
            (_, KeyCode::Enter) => self.insert_text("\n"),
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete_forward(),
            // 光标移动
            (_, KeyCode::Left) => self.move_caret_left(),
            (_, KeyCode::Right) => self.move_caret_right(),
            (_, KeyCode::Up) => self.move_caret_vertical(-1),
            (_, KeyCode::Down) => self.move_caret_vertical(1),
            (_, KeyCode::Home) => self.move_line_start(),
            (_, KeyCode::End) => self.move_line_end(),
            (_, KeyCode::PageUp) => self.move_caret_vertical(-(self.viewport_height as isize)),
            (_, KeyCode::PageDown) => self.move_caret_vertical(self.viewport_height as isize),
            // 字符输入
            (mods, KeyCode::Char(c))
                if mods.is_empty() || mods == KeyModifiers::SHIFT =>
            {
                self.insert_text(&c.to_string());
            }
            _ => {}
        }
    }

    /// 搜索框按键：全部转交组件的搜索面板键盘面
    fn handle_search_prompt_key(&mut self, key: KeyEvent) {
        let search_key = match (key.modifiers, key.code) {
            (KeyModifiers::SHIFT, KeyCode::Enter) => SearchKey::ShiftEnter,
            (_, KeyCode::Enter) => SearchKey::Enter,
            (_, KeyCode::Esc) => SearchKey::Escape,
            (_, KeyCode::Backspace) => SearchKey::Backspace,
            (mods, KeyCode::Char(c)) if mods.is_empty() || mods == KeyModifiers::SHIFT => {
                SearchKey::Char(c)
            }
            _ => return,
        };

        match self.editor.handle_search_key(search_key) {
            SearchOutcome::Jumped(offset) => {
                self.editor.scroll_to_offset(offset);
                self.clamp_scroll();
                if let Some((current, total)) = self.editor.match_counter() {
                    self.status_message = format!("第 {} / {} 个匹配", current, total);
                }
            }
            SearchOutcome::Closed => {
                // 焦点回到输入层
                self.input_mode = InputMode::Normal;
                self.status_message.clear();
            }
            SearchOutcome::QueryChanged | SearchOutcome::Ignored => {}
        }
    }

    fn find_next(&mut self) {
        if let Some(offset) = self.editor.next_match() {
            self.editor.scroll_to_offset(offset);
            self.clamp_scroll();
        } else {
            self.status_message = "没有匹配".to_string();
        }
    }

    fn find_prev(&mut self) {
        if let Some(offset) = self.editor.prev_match() {
            self.editor.scroll_to_offset(offset);
            self.clamp_scroll();
        } else {
            self.status_message = "没有匹配".to_string();
        }
    }

    // ---- 编辑操作 ---------------------------------------------------------

    fn insert_text(&mut self, insert: &str) {
        if self.editor.read_only() {
            self.status_message = "只读模式".to_string();
            return;
        }
        let (text, caret) = edit::replace_range(&self.text, Selection::caret(self.caret), insert);
        if self.editor.edit(text) {
            self.apply_pending_changes();
            self.caret = caret;
            self.ensure_caret_visible();
        }
    }

    fn insert_tab(&mut self) {
        if let Some(caret) = self.editor.insert_indent(Selection::caret(self.caret)) {
            self.apply_pending_changes();
            self.caret = caret;
            self.ensure_caret_visible();
        } else {
            self.status_message = "只读模式".to_string();
        }
    }

    fn backspace(&mut self) {
        if self.editor.read_only() {
            self.status_message = "只读模式".to_string();
            return;
        }
        if self.caret == 0 {
            return;
        }
        let start = edit::prev_grapheme_boundary(&self.text, self.caret);
        let (text, caret) = edit::replace_range(
            &self.text,
            Selection {
                start,
                end: self.caret,
            },
            "",
        );
        if self.editor.edit(text) {
            self.apply_pending_changes();
            self.caret = caret;
            self.ensure_caret_visible();
        }
    }

    fn delete_forward(&mut self) {
        if self.editor.read_only() {
            self.status_message = "只读模式".to_string();
            return;
        }
        let end = edit::next_grapheme_boundary(&self.text, self.caret);
        if end == self.caret {
            return;
        }
        let (text, caret) = edit::replace_range(
            &self.text,
            Selection {
                start: self.caret,
                end,
            },
            "",
        );
        if self.editor.edit(text) {
            self.apply_pending_changes();
            self.caret = caret;
            self.ensure_caret_visible();
        }
    }

    // ---- 光标移动 ---------------------------------------------------------

    fn move_caret_left(&mut self) {
        self.caret = edit::prev_grapheme_boundary(&self.text, self.caret);
        self.ensure_caret_visible();
    }

    fn move_caret_right(&mut self) {
        self.caret = edit::next_grapheme_boundary(&self.text, self.caret);
        self.ensure_caret_visible();
    }

    fn move_caret_vertical(&mut self, delta: isize) {
        let index = self.editor.line_index();
        let (line, column) = index.char_offset_to_position(self.caret);
        let target = line.saturating_add_signed(delta);
        let target = target.min(index.line_count().saturating_sub(1));
        self.caret = index.position_to_char_offset(target, column);
        self.ensure_caret_visible();
    }

    fn move_line_start(&mut self) {
        let index = self.editor.line_index();
        let (line, _) = index.char_offset_to_position(self.caret);
        self.caret = index.position_to_char_offset(line, 0);
        self.ensure_caret_visible();
    }

    fn move_line_end(&mut self) {
        let index = self.editor.line_index();
        let (line, _) = index.char_offset_to_position(self.caret);
        self.caret = index.position_to_char_offset(line, usize::MAX);
        self.ensure_caret_visible();
    }

    // ---- 滚动 -------------------------------------------------------------

    /// 保证光标在视口内（垂直 + 水平），并同步三个表面
    fn ensure_caret_visible(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        let surfaces = self.editor.surfaces();
        let mut top = surfaces.input.top;
        let mut left = surfaces.input.left;

        let index = self.editor.line_index();
        let (line, column) = index.char_offset_to_position(self.caret);
        if line < top {
            top = line;
        } else if line >= top + self.viewport_height {
            top = line + 1 - self.viewport_height;
        }

        let line_text = index.get_line_text(line).unwrap_or_default();
        let x = layout::visual_x_for_column(&line_text, column, layout::DEFAULT_TAB_WIDTH);
        if x < left {
            left = x;
        } else if self.viewport_width > 0 && x >= left + self.viewport_width {
            left = x + 1 - self.viewport_width;
        }

        self.editor.sync_scroll(top, left);
    }

    /// scroll_to_offset 只保证下限，把上限夹回文档末尾
    fn clamp_scroll(&mut self) {
        let surfaces = self.editor.surfaces();
        let max_top = self
            .editor
            .line_count()
            .saturating_sub(self.viewport_height.max(1));
        if surfaces.input.top > max_top {
            self.editor.sync_scroll(max_top, surfaces.input.left);
        }
    }

    // ---- 渲染 -------------------------------------------------------------

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let mut constraints = vec![Constraint::Length(1)]; // 工具栏
        if self.editor.search_open() {
            constraints.push(Constraint::Length(1)); // 搜索框
        }
        constraints.push(Constraint::Min(1)); // 编辑器区域
        if !self.editor.validity().is_valid {
            constraints.push(Constraint::Length(1)); // 错误提示
        }
        constraints.push(Constraint::Length(1)); // 快捷键提示

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        let mut next = 0;
        let toolbar_area = chunks[next];
        next += 1;

        let search_area = if self.editor.search_open() {
            let area = chunks[next];
            next += 1;
            Some(area)
        } else {
            None
        };

        let editor_chunk = chunks[next];
        next += 1;

        let error_area = if !self.editor.validity().is_valid {
            let area = chunks[next];
            next += 1;
            Some(area)
        } else {
            None
        };

        let shortcuts_area = chunks[next];

        // 非全屏时遵守行数提示
        let editor_rows = self
            .editor
            .effective_height(editor_chunk.height as usize)
            .max(1) as u16;
        let editor_area = Rect {
            height: editor_rows.min(editor_chunk.height),
            ..editor_chunk
        };

        self.render_toolbar(frame, toolbar_area);
        if let Some(area) = search_area {
            self.render_search_bar(frame, area);
        }
        self.render_editor(frame, editor_area);
        if let Some(area) = error_area {
            self.render_error_strip(frame, area);
        }
        self.render_shortcuts(frame, shortcuts_area);
    }

    /// 渲染工具栏：JSON 标签 + 校验指示 + 文件名
    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let validity = self.editor.validity();
        let mut spans = vec![
            Span::styled(" JSON ", Style::default().fg(Color::DarkGray)),
            if validity.is_valid {
                Span::styled("✓ 有效", Style::default().fg(Color::Green))
            } else {
                Span::styled("✗ 格式错误", Style::default().fg(Color::Red))
            },
        ];
        if self.editor.read_only() {
            spans.push(Span::styled("  [只读]", Style::default().fg(Color::Yellow)));
        }
        if self.editor.expanded() {
            spans.push(Span::styled("  [全屏]", Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(
            format!(
                "  {} {}",
                self.file_path.display(),
                if self.dirty { "[+]" } else { "" }
            ),
            Style::default().fg(Color::Gray),
        ));

        let toolbar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
        frame.render_widget(toolbar, area);
    }

    /// 渲染搜索框与匹配计数
    fn render_search_bar(&self, frame: &mut Frame, area: Rect) {
        let query = self.editor.search().query();
        let counter = match self.editor.match_counter() {
            Some((current, total)) => format!("  {} / {}", current, total),
            None => String::new(),
        };
        let bar = Paragraph::new(Line::from(vec![
            Span::styled(" 搜索: ", Style::default().fg(Color::Cyan)),
            Span::raw(query.to_string()),
            Span::styled(counter, Style::default().fg(Color::DarkGray)),
            Span::styled(
                "  (Enter=下一个 Shift+Enter=上一个 Esc=关闭)",
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .style(Style::default().bg(Color::Black));
        frame.render_widget(bar, area);

        if self.input_mode == InputMode::Search {
            // 光标放在查询串末尾
            let x = area.x
                + " 搜索: ".chars().map(layout::char_width).sum::<usize>() as u16
                + layout::visual_x_for_column(query, query.chars().count(), 1) as u16;
            frame.set_cursor_position((x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }

    /// 渲染编辑器：行号 gutter + 高亮文本，三个表面共享滚动偏移
    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            " {} ",
            self.file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file_path.display().to_string()),
        ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line_count = self.editor.line_count();
        let gutter_width = (line_count.max(1).ilog10() as u16 + 1).max(3) + 1;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(gutter_width), Constraint::Min(1)])
            .split(inner);
        let gutter_area = columns[0];
        let text_area = columns[1];

        self.viewport_height = text_area.height as usize;
        self.viewport_width = text_area.width as usize;
        self.editor.set_viewport_height(self.viewport_height);

        // resize 之后把滚动位置夹回合法区间
        self.clamp_scroll();
        let surfaces = self.editor.surfaces();

        // 行号（只跟随垂直滚动）
        let mut numbers = Vec::with_capacity(self.viewport_height);
        for row in 0..self.viewport_height {
            let line = surfaces.gutter_top + row;
            if line < line_count {
                numbers.push(Line::from(format!("{} ", line + 1)));
            } else {
                numbers.push(Line::from(""));
            }
        }
        let gutter = Paragraph::new(numbers)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(gutter, gutter_area);

        // 高亮层：语法着色 + 搜索高亮合成
        let search = self.editor.search();
        let spans = compose(&self.text, search.matches(), search.current());
        let all_lines = spans_to_lines(&spans);

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(surfaces.overlay.top)
            .take(self.viewport_height)
            .collect();
        let paragraph = Paragraph::new(visible).scroll((0, surfaces.overlay.left as u16));
        frame.render_widget(paragraph, text_area);

        // 输入层光标
        if self.input_mode != InputMode::Normal || self.viewport_height == 0 {
            return;
        }
        let index = self.editor.line_index();
        let (line, column) = index.char_offset_to_position(self.caret);
        if line < surfaces.input.top || line >= surfaces.input.top + self.viewport_height {
            return;
        }
        let line_text = index.get_line_text(line).unwrap_or_default();
        let x = layout::visual_x_for_column(&line_text, column, layout::DEFAULT_TAB_WIDTH);
        if x < surfaces.input.left {
            return;
        }
        let rel_x = (x - surfaces.input.left) as u16;
        let rel_y = (line - surfaces.input.top) as u16;
        if rel_x >= text_area.width {
            return;
        }
        frame.set_cursor_position((text_area.x + rel_x, text_area.y + rel_y));
    }

    /// 渲染错误提示条（内联，不弹窗）
    fn render_error_strip(&self, frame: &mut Frame, area: Rect) {
        let message = self
            .editor
            .validity()
            .message
            .as_deref()
            .unwrap_or("JSON 无效");
        let strip = Paragraph::new(format!(" {}", message))
            .style(Style::default().bg(Color::Red).fg(Color::White));
        frame.render_widget(strip, area);
    }

    /// 渲染快捷键提示
    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = if self.confirm_quit {
            "Y:保存并退出  N:不保存退出  Esc:取消"
        } else if self.input_mode == InputMode::Search {
            "Enter:下一个  Shift+Enter:上一个  Esc:关闭搜索"
        } else {
            "Ctrl-S:保存  Ctrl-X:退出  Ctrl-F:搜索  F3:下一个  Alt-F:格式化  Alt-M:压缩  Alt-E:全屏  Tab:缩进"
        };

        let shortcuts_line = Paragraph::new(if self.status_message.is_empty() {
            shortcuts.to_string()
        } else {
            format!("{}  |  {}", self.status_message, shortcuts)
        })
        .style(Style::default().bg(Color::Blue).fg(Color::White));

        frame.render_widget(shortcuts_line, area);
    }
}

/// 把合成 span 流按 '\n' 切成 ratatui 行，样式跨行保持
fn spans_to_lines<'a>(spans: &[HighlightSpan<'a>]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'a>> = Vec::new();

    for span in spans {
        let style = style_for_span(span.style);
        let mut rest = span.text;
        loop {
            match rest.find('\n') {
                Some(pos) => {
                    if pos > 0 {
                        current.push(Span::styled(&rest[..pos], style));
                    }
                    lines.push(Line::from(std::mem::take(&mut current)));
                    rest = &rest[pos + 1..];
                }
                None => {
                    if !rest.is_empty() {
                        current.push(Span::styled(rest, style));
                    }
                    break;
                }
            }
        }
    }

    lines.push(Line::from(current));
    lines
}

fn style_for_span(style: SpanStyle) -> Style {
    match style {
        SpanStyle::Token(TokenKind::String) => Style::default().fg(Color::Green),
        SpanStyle::Token(TokenKind::Number) => Style::default().fg(Color::Yellow),
        SpanStyle::Token(TokenKind::Keyword) => Style::default().fg(Color::Magenta),
        SpanStyle::Token(TokenKind::Punctuation) => Style::default().fg(Color::DarkGray),
        SpanStyle::Token(TokenKind::Whitespace) => Style::default(),
        SpanStyle::Token(TokenKind::Other) => Style::default().fg(Color::Gray),
        SpanStyle::Match => Style::default().bg(Color::Yellow).fg(Color::Black),
        SpanStyle::ActiveMatch => Style::default()
            .bg(Color::LightYellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    }
}

fn main() -> io::Result<()> {
    // 获取命令行参数
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("用法: {} <file_path> [--read-only]", args[0]);
        eprintln!("\n示例:");
        eprintln!("  {} workflow.json", args[0]);
        process::exit(1);
    }

    let file_path = PathBuf::from(&args[1]);
    let read_only = args.iter().skip(2).any(|a| a == "--read-only" || a == "-r");

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 创建应用
    let mut app = App::new(file_path, read_only)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("错误: {}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    app.handle_key_event(key);
                }
                Event::Paste(text) => {
                    app.insert_text(&text);
                }
                Event::Resize(_, _) => {
                    // 下一帧重新布局
                }
                _ => {}
            }
        }
    }

    Ok(())
}
