//! User configuration: motion constants, preview settings and keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/page-motion/config.toml` (default
//! `~/.config/page-motion/config.toml`).  Unknown keys are skipped and values
//! that fail to parse keep their defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    ToggleDrawer,
    ToggleSubmenu,
    NextFooterItem,
    RollNavLink,
    Dismiss,
    ToggleMobile,
    ToggleReducedMotion,
    ToggleTouch,
    ShowControls,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls popup).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::ToggleDrawer,
        Action::ToggleSubmenu,
        Action::NextFooterItem,
        Action::RollNavLink,
        Action::Dismiss,
        Action::ToggleMobile,
        Action::ToggleReducedMotion,
        Action::ToggleTouch,
        Action::ShowControls,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::Top => "Back to Top",
            Action::ToggleDrawer => "Open / Close Drawer",
            Action::ToggleSubmenu => "Tap Submenu Trigger",
            Action::NextFooterItem => "Open Next Footer Item",
            Action::RollNavLink => "Hover Next Nav Link",
            Action::Dismiss => "Dismiss (Escape)",
            Action::ToggleMobile => "Desktop / Mobile Viewport",
            Action::ToggleReducedMotion => "Reduced Motion",
            Action::ToggleTouch => "Touch Input",
            Action::ShowControls => "Controls",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::ToggleDrawer => "toggle_drawer",
            Action::ToggleSubmenu => "toggle_submenu",
            Action::NextFooterItem => "next_footer_item",
            Action::RollNavLink => "roll_nav_link",
            Action::Dismiss => "dismiss",
            Action::ToggleMobile => "toggle_mobile",
            Action::ToggleReducedMotion => "toggle_reduced_motion",
            Action::ToggleTouch => "toggle_touch",
            Action::ShowControls => "show_controls",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Capture a pressed key as a binding.  Shift is dropped for characters
    /// since the character already carries it.
    pub fn from_key_event(event: KeyEvent) -> Self {
        let mut modifiers = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self { code: event.code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared, and SHIFT not at all for characters (`?` arrives with
    /// SHIFT on most terminals).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        if matches!(self.code, KeyCode::Char(_)) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Display / config string (e.g. `"Ctrl+c"`, `"PageDown"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&self.key_name());
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── motion ────────────

/// Constants shared by the page behaviors.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Desktop header: always shown within this many pixels of the top.
    pub links_top_reveal_px: f64,
    /// Desktop header: dead zone before a flip.
    pub links_delta: f64,
    pub mobile_top_reveal_px: f64,
    pub mobile_delta: f64,
    /// Mobile header reappears after scrolling stops for this long.
    pub mobile_idle_ms: u64,
    /// Viewports at or below this width count as mobile.
    pub mobile_max_width: f64,
    /// Hero finishes shrinking after this fraction of the viewport height.
    pub hero_end_ratio: f64,
    /// Floating CTAs reappear after scrolling stops for this long.
    pub cta_idle_ms: u64,
    /// Extra space below the viewport in which the footer hides the CTAs.
    pub cta_footer_margin_px: f64,
    /// Added to the drawer transition before the close fallback fires.
    pub drawer_close_grace_ms: u64,
    /// Visible fraction at which a process section wobbles.
    pub wobble_threshold: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            links_top_reveal_px: 40.0,
            links_delta: 8.0,
            mobile_top_reveal_px: 40.0,
            mobile_delta: 6.0,
            mobile_idle_ms: 180,
            mobile_max_width: 1024.0,
            hero_end_ratio: 0.6,
            cta_idle_ms: 220,
            cta_footer_margin_px: 200.0,
            drawer_close_grace_ms: 80,
            wobble_threshold: 0.3,
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: motion constants, preview and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub motion: MotionConfig,
    /// Preview frame period.
    pub frame_interval_ms: u64,
    /// Pixels per scroll keypress / wheel notch.
    pub scroll_step_px: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            motion: MotionConfig::default(),
            frame_interval_ms: 16,
            scroll_step_px: 48.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

impl AppConfig {
    /// Built-in bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(ToggleDrawer, vec![KeyBind::new(Char('d'), n)]);
        m.insert(ToggleSubmenu, vec![KeyBind::new(Char('s'), n)]);
        m.insert(NextFooterItem, vec![KeyBind::new(Char('f'), n)]);
        m.insert(RollNavLink, vec![KeyBind::new(Char('n'), n)]);
        m.insert(Dismiss, vec![KeyBind::new(Esc, n)]);
        m.insert(ToggleMobile, vec![KeyBind::new(Char('m'), n)]);
        m.insert(ToggleReducedMotion, vec![KeyBind::new(Char('r'), n)]);
        m.insert(ToggleTouch, vec![KeyBind::new(Char('t'), n)]);
        m.insert(ShowControls, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding to `action`, taking it away from any other action.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| *b != bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn reset_bindings(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"Up/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: drawer | {}: mobile | {}: reduced motion | {}: controls | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ToggleDrawer),
            self.short_binding(Action::ToggleMobile),
            self.short_binding(Action::ToggleReducedMotion),
            self.short_binding(Action::ShowControls),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    /// Parse the key-value format.  Bad values are reported and skipped.
    pub fn parse(s: &str) -> Self {
        let mut cfg = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if cfg.apply_setting(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "unknown config key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if parsed.is_empty() {
                tracing::warn!(key, value, "no usable key bindings");
            } else {
                cfg.bindings.insert(action, parsed);
            }
        }

        cfg
    }

    /// Apply one numeric setting.  Returns `false` when `key` is not a setting.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        let m = &mut self.motion;
        let slot: Setting<'_> = match key {
            "links_top_reveal_px" => Setting::Num(&mut m.links_top_reveal_px, 0.0, 10_000.0),
            "links_delta" => Setting::Num(&mut m.links_delta, 1.0, 500.0),
            "mobile_top_reveal_px" => Setting::Num(&mut m.mobile_top_reveal_px, 0.0, 10_000.0),
            "mobile_delta" => Setting::Num(&mut m.mobile_delta, 1.0, 500.0),
            "mobile_idle_ms" => Setting::Ms(&mut m.mobile_idle_ms, 0, 5_000),
            "mobile_max_width" => Setting::Num(&mut m.mobile_max_width, 0.0, 10_000.0),
            "hero_end_ratio" => Setting::Num(&mut m.hero_end_ratio, 0.05, 5.0),
            "cta_idle_ms" => Setting::Ms(&mut m.cta_idle_ms, 0, 5_000),
            "cta_footer_margin_px" => Setting::Num(&mut m.cta_footer_margin_px, 0.0, 5_000.0),
            "drawer_close_grace_ms" => Setting::Ms(&mut m.drawer_close_grace_ms, 0, 5_000),
            "wobble_threshold" => Setting::Num(&mut m.wobble_threshold, 0.0, 1.0),
            "frame_interval_ms" => Setting::Ms(&mut self.frame_interval_ms, 4, 1_000),
            "scroll_step_px" => Setting::Num(&mut self.scroll_step_px, 1.0, 2_000.0),
            "viewport_width" => Setting::Num(&mut self.viewport_width, 200.0, 10_000.0),
            "viewport_height" => Setting::Num(&mut self.viewport_height, 200.0, 10_000.0),
            _ => return false,
        };

        let ok = match slot {
            Setting::Num(target, lo, hi) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    *target = v.clamp(lo, hi);
                    true
                }
                _ => false,
            },
            Setting::Ms(target, lo, hi) => match value.parse::<u64>() {
                Ok(v) => {
                    *target = v.clamp(lo, hi);
                    true
                }
                Err(_) => false,
            },
        };
        if !ok {
            tracing::warn!(key, value, "ignoring malformed config value");
        }
        true
    }

    fn serialise(&self) -> String {
        let m = &self.motion;
        let mut lines = vec![
            "# page-motion configuration".to_string(),
            String::new(),
            "# Motion".to_string(),
            format!("links_top_reveal_px = {}", m.links_top_reveal_px),
            format!("links_delta = {}", m.links_delta),
            format!("mobile_top_reveal_px = {}", m.mobile_top_reveal_px),
            format!("mobile_delta = {}", m.mobile_delta),
            format!("mobile_idle_ms = {}", m.mobile_idle_ms),
            format!("mobile_max_width = {}", m.mobile_max_width),
            format!("hero_end_ratio = {}", m.hero_end_ratio),
            format!("cta_idle_ms = {}", m.cta_idle_ms),
            format!("cta_footer_margin_px = {}", m.cta_footer_margin_px),
            format!("drawer_close_grace_ms = {}", m.drawer_close_grace_ms),
            format!("wobble_threshold = {}", m.wobble_threshold),
            String::new(),
            "# Preview".to_string(),
            format!("frame_interval_ms = {}", self.frame_interval_ms),
            format!("scroll_step_px = {}", self.scroll_step_px),
            format!("viewport_width = {}", self.viewport_width),
            format!("viewport_height = {}", self.viewport_height),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.display()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

enum Setting<'a> {
    Num(&'a mut f64, f64, f64),
    Ms(&'a mut u64, u64, u64),
}

/// Return the config file path (`$XDG_CONFIG_HOME/page-motion/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("page-motion").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides_and_clamps() {
        let cfg = AppConfig::parse(
            "# comment\n\
             [motion]\n\
             links_delta = 12\n\
             mobile_idle_ms = 99999\n\
             hero_end_ratio = nope\n\
             quit = Ctrl+q, x\n",
        );
        assert_eq!(cfg.motion.links_delta, 12.0);
        assert_eq!(cfg.motion.mobile_idle_ms, 5_000);
        assert_eq!(cfg.motion.hero_end_ratio, 0.6);
        assert_eq!(
            cfg.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::NONE),
            ]
        );
    }

    #[test]
    fn test_default_page_bindings() {
        let cfg = AppConfig::default();
        let up = KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(cfg.match_key(up), Some(Action::PageUp));
        assert_eq!(cfg.match_key(down), Some(Action::PageDown));
    }

    #[test]
    fn test_unitless_ratios_parse() {
        let cfg = AppConfig::parse("hero_end_ratio = 0.75
wobble_threshold = 2
");
        assert_eq!(cfg.motion.hero_end_ratio, 0.75);
        assert_eq!(cfg.motion.wobble_threshold, 1.0);
    }

    #[test]
    fn test_serialise_round_trips_through_parse() {
        let mut cfg = AppConfig::default();
        cfg.motion.cta_idle_ms = 300;
        cfg.scroll_step_px = 64.0;
        let back = AppConfig::parse(&cfg.serialise());
        assert_eq!(back.motion, cfg.motion);
        assert_eq!(back.scroll_step_px, 64.0);
        assert_eq!(back.bindings, cfg.bindings);
    }

    #[test]
    fn test_match_key_prefers_more_modifiers() {
        let mut cfg = AppConfig::default();
        cfg.bindings
            .insert(Action::Top, vec![KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL)]);
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(cfg.match_key(ev), Some(Action::Top));
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(cfg.match_key(ev), Some(Action::Quit));
    }

    #[test]
    fn test_add_binding_moves_key_between_actions() {
        let mut cfg = AppConfig::default();
        let d = KeyBind::new(KeyCode::Char('d'), KeyModifiers::NONE);
        cfg.add_binding(Action::Top, d.clone());
        assert!(!cfg.bindings[&Action::ToggleDrawer].contains(&d));
        assert_eq!(cfg.display_bindings(Action::ToggleDrawer), "unbound");
        assert!(cfg.bindings[&Action::Top].contains(&d));

        cfg.reset_bindings();
        assert_eq!(cfg.display_bindings(Action::ToggleDrawer), "d");
    }

    #[test]
    fn test_captured_shifted_char_drops_shift() {
        let ev = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(KeyBind::from_key_event(ev), KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE));
    }
}
