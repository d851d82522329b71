use super::runner::OutputMode;
use crate::export::Window;

pub fn parse_format_input(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|x| x.trim().to_lowercase())
}

pub fn parse_output_mode(s: &Option<String>) -> OutputMode {
    match parse_format_input(s).as_deref() {
        Some("json") => OutputMode::Json,
        Some("plain") => OutputMode::Plain,
        _ => OutputMode::Human,
    }
}

/// Offset/limit as typed on the command line; unset means 0 for both.
pub fn parse_window(offset: Option<i64>, limit: Option<i64>) -> Window {
    Window::from_signed(offset.unwrap_or(0), limit.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_parsing() {
        assert_eq!(parse_output_mode(&Some("JSON".into())), OutputMode::Json);
        assert_eq!(parse_output_mode(&Some("plain".into())), OutputMode::Plain);
        assert_eq!(parse_output_mode(&Some("fancy".into())), OutputMode::Human);
        assert_eq!(parse_output_mode(&None), OutputMode::Human);
    }

    #[test]
    fn window_parsing() {
        assert_eq!(parse_window(None, None), Window::new(0, None));
        assert_eq!(parse_window(Some(-5), Some(0)), Window::new(0, None));
        assert_eq!(parse_window(Some(3), Some(10)), Window::new(3, Some(10)));
    }
}
