//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are context-aware. A key is looked up in the focused panel's
//! context first and then in `Global`, so the same key can mean different
//! things in the columns, the trending list and the search box.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavUp,
    NavDown,
    NavLeft,
    NavRight,
    CycleFocus,
    Back,
    Select,
    NextPage,
    PrevPage,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    OpenMedia,
    TogglePause,
    ScrollUp,
    ScrollDown,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::NavUp => "Previous article / item",
            Self::NavDown => "Next article / item",
            Self::NavLeft => "Column to the left",
            Self::NavRight => "Column to the right",
            Self::CycleFocus => "Cycle focus: columns, trending, search",
            Self::Back => "Dismiss / collapse",
            Self::Select => "Expand article / jump to trending story",
            Self::NextPage => "Next page of columns",
            Self::PrevPage => "Previous page of columns",
            Self::EnterSearch => "Search articles",
            Self::ExitSearch => "Leave search box",
            Self::CommitSearch => "Jump to highlighted suggestion",
            Self::OpenMedia => "Open video in browser",
            Self::TogglePause => "Pause / resume column scrolling",
            Self::ScrollUp => "Scroll column back",
            Self::ScrollDown => "Scroll column forward",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    let action = match name.to_lowercase().replace('-', "_").as_str() {
        "quit" => Action::Quit,
        "nav_up" | "up" => Action::NavUp,
        "nav_down" | "down" => Action::NavDown,
        "nav_left" | "left" => Action::NavLeft,
        "nav_right" | "right" => Action::NavRight,
        "cycle_focus" | "focus" => Action::CycleFocus,
        "back" => Action::Back,
        "select" | "expand" => Action::Select,
        "next_page" => Action::NextPage,
        "prev_page" | "previous_page" => Action::PrevPage,
        "enter_search" | "search" => Action::EnterSearch,
        "exit_search" => Action::ExitSearch,
        "commit_search" => Action::CommitSearch,
        "open_media" | "open" => Action::OpenMedia,
        "toggle_pause" | "pause" => Action::TogglePause,
        "scroll_up" => Action::ScrollUp,
        "scroll_down" => Action::ScrollDown,
        "cycle_theme" | "theme" => Action::CycleTheme,
        "show_help" | "help" => Action::ShowHelp,
        _ => return None,
    };
    Some(action)
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Columns,
    Trending,
    Search,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Columns => "Columns",
            Self::Trending => "Trending",
            Self::Search => "Search",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("Backspace", KeyCode::Backspace),
    ("Space", KeyCode::Char(' ')),
];

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "PageDown", "Space", ...
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let lower = s.to_lowercase();
    let alias = match lower.as_str() {
        "return" => "enter",
        "escape" => "esc",
        "pgup" => "pageup",
        "pgdn" => "pagedown",
        other => other,
    };
    if let Some((_, code)) = NAMED_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(alias))
    {
        return Some(KeySpec::plain(*code));
    }

    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12)
            .contains(&n)
            .then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::ch(c)),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        code => NAMED_KEYS
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(name, _)| (*name).to_string())
            .unwrap_or_else(|| "?".to_string()),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Default bindings, in help-screen order.
const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    // Global
    (Context::Global, KeySpec::ch('q'), Action::Quit),
    (Context::Global, KeySpec::ctrl('c'), Action::Quit),
    (Context::Global, KeySpec::plain(KeyCode::Tab), Action::CycleFocus),
    (Context::Global, KeySpec::plain(KeyCode::Esc), Action::Back),
    (Context::Global, KeySpec::ch('/'), Action::EnterSearch),
    (Context::Global, KeySpec::ch(']'), Action::NextPage),
    (Context::Global, KeySpec::plain(KeyCode::PageDown), Action::NextPage),
    (Context::Global, KeySpec::ch('['), Action::PrevPage),
    (Context::Global, KeySpec::plain(KeyCode::PageUp), Action::PrevPage),
    (Context::Global, KeySpec::ch('o'), Action::OpenMedia),
    (Context::Global, KeySpec::ch('T'), Action::CycleTheme),
    (Context::Global, KeySpec::ch('?'), Action::ShowHelp),
    // Columns
    (Context::Columns, KeySpec::ch('k'), Action::NavUp),
    (Context::Columns, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Columns, KeySpec::ch('j'), Action::NavDown),
    (Context::Columns, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Columns, KeySpec::ch('h'), Action::NavLeft),
    (Context::Columns, KeySpec::plain(KeyCode::Left), Action::NavLeft),
    (Context::Columns, KeySpec::ch('l'), Action::NavRight),
    (Context::Columns, KeySpec::plain(KeyCode::Right), Action::NavRight),
    (Context::Columns, KeySpec::plain(KeyCode::Enter), Action::Select),
    (Context::Columns, KeySpec::ch(' '), Action::Select),
    (Context::Columns, KeySpec::ch('p'), Action::TogglePause),
    (Context::Columns, KeySpec::ch('K'), Action::ScrollUp),
    (Context::Columns, KeySpec::ch('J'), Action::ScrollDown),
    // Trending
    (Context::Trending, KeySpec::ch('k'), Action::NavUp),
    (Context::Trending, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Trending, KeySpec::ch('j'), Action::NavDown),
    (Context::Trending, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Trending, KeySpec::plain(KeyCode::Enter), Action::Select),
    // Search
    (Context::Search, KeySpec::plain(KeyCode::Esc), Action::ExitSearch),
    (Context::Search, KeySpec::plain(KeyCode::Enter), Action::CommitSearch),
    (Context::Search, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Search, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Search, KeySpec::plain(KeyCode::Tab), Action::CycleFocus),
];

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts.
#[derive(Debug, Clone)]
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::with_capacity(DEFAULT_BINDINGS.len()),
            bindings: Vec::with_capacity(DEFAULT_BINDINGS.len()),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    /// Apply user overrides from the config `[keybindings]` table.
    ///
    /// Keys in the map are action names (e.g., "quit", "next_page").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). An override
    /// replaces every default key for that action, in every context the
    /// action was bound in.
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        // Sorted so that conflicting overrides resolve the same way every run
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        for (action_name, key_str) in entries {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first and then Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Shift is already folded into the character itself
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);
        self.lookup.get(&(context, key)).copied().or_else(|| {
            (context != Context::Global)
                .then(|| self.lookup.get(&(Context::Global, key)).copied())
                .flatten()
        })
    }

    /// Keys bound to `action` in `context`, formatted for display.
    pub fn keys_for(&self, context: Context, action: Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(c, _, a)| *c == context && *a == action)
            .map(|(_, k, _)| format_key(k))
            .collect()
    }

    /// All bindings for the help screen, as
    /// (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_default_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Char('q'), Context::Global),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, Context::Columns),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_column_navigation() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Char('j'), Context::Columns),
            Some(Action::NavDown)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Left, Context::Columns),
            Some(Action::NavLeft)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Char('J'), Context::Columns),
            Some(Action::ScrollDown)
        );
    }

    #[test]
    fn test_shifted_chars_match_plain_bindings() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Columns),
            Some(Action::CycleTheme)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('?'), KeyModifiers::SHIFT, Context::Global),
            Some(Action::ShowHelp)
        );
        // Shift on named keys is significant
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::SHIFT, Context::Columns),
            None
        );
    }

    #[test]
    fn test_context_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Char(']'), Context::Trending),
            Some(Action::NextPage)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Char('q'), Context::Columns),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_search_context_overrides_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Esc, Context::Search),
            Some(Action::ExitSearch)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Enter, Context::Search),
            Some(Action::CommitSearch)
        );
        assert_eq!(lookup(&reg, KeyCode::Esc, Context::Global), Some(Action::Back));
    }

    #[test]
    fn test_column_keys_not_bound_in_trending() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('h'), Context::Trending), None);
        assert_eq!(lookup(&reg, KeyCode::Char('p'), Context::Trending), None);
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::F(12), Context::Global), None);
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("next_page".to_string(), "n".to_string())]);

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        assert_eq!(lookup(&reg, KeyCode::Char(']'), Context::Global), None);
        assert_eq!(lookup(&reg, KeyCode::PageDown, Context::Global), None);
        assert_eq!(
            lookup(&reg, KeyCode::Char('n'), Context::Global),
            Some(Action::NextPage)
        );
    }

    #[test]
    fn test_override_preserves_contexts() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("nav_down".to_string(), "n".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());

        for ctx in [Context::Columns, Context::Trending, Context::Search] {
            assert_eq!(
                lookup(&reg, KeyCode::Char('n'), ctx),
                Some(Action::NavDown),
                "{:?}",
                ctx
            );
        }
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Columns), None);
    }

    #[test]
    fn test_apply_overrides_unknown_action() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("refresh".to_string(), "r".to_string())]);

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unknown action"));
    }

    #[test]
    fn test_apply_overrides_bad_key() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("quit".to_string(), "Ctrl+Alt+Q".to_string())]);

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Cannot parse key"));
        // Default binding untouched
        assert_eq!(
            lookup(&reg, KeyCode::Char('q'), Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_parse_key_string_named_keys() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("escape"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("pgdn"), Some(KeySpec::plain(KeyCode::PageDown)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::ch(' ')));
    }

    #[test]
    fn test_parse_key_string_function_keys() {
        assert_eq!(parse_key_string("F1"), Some(KeySpec::plain(KeyCode::F(1))));
        assert_eq!(parse_key_string("f12"), Some(KeySpec::plain(KeyCode::F(12))));
        assert_eq!(parse_key_string("F0"), None);
        assert_eq!(parse_key_string("F13"), None);
    }

    #[test]
    fn test_parse_key_string_chars_and_ctrl() {
        assert_eq!(parse_key_string("q"), Some(KeySpec::ch('q')));
        assert_eq!(parse_key_string("]"), Some(KeySpec::ch(']')));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("qq"), None);
        // Lone "f" is a character, not a function key
        assert_eq!(parse_key_string("f"), Some(KeySpec::ch('f')));
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ch('q')), "q");
        assert_eq!(format_key(&KeySpec::ch(' ')), "Space");
        assert_eq!(format_key(&KeySpec::ctrl('c')), "Ctrl+c");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::PageDown)), "PageDown");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(5))), "F5");
    }

    #[test]
    fn test_keys_for_lists_all_defaults() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.keys_for(Context::Global, Action::NextPage),
            vec!["]".to_string(), "PageDown".to_string()]
        );
    }

    #[test]
    fn test_all_bindings_cover_every_action() {
        let reg = KeybindingRegistry::new();
        let bindings = reg.all_bindings();
        assert_eq!(bindings.len(), DEFAULT_BINDINGS.len());
        for action in [
            Action::Quit,
            Action::Select,
            Action::OpenMedia,
            Action::TogglePause,
            Action::ShowHelp,
        ] {
            assert!(bindings.iter().any(|(_, _, a, _)| *a == action));
        }
    }
}
