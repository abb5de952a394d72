//! Raw shell output cleanup.

use memchr::{memchr, memrchr};

/// Strip carriage returns, the echoed command line and the trailing prompt.
pub fn normalize_output(raw: &str, command: &str) -> String {
    let text = raw.replace('\r', "");
    let mut body = text.as_str();

    // The shell echoes the command on the first line.
    if let Some(end) = memchr(b'\n', body.as_bytes()) {
        if body[..end].trim_end().ends_with(command.trim()) {
            body = &body[end + 1..];
        }
    } else if body.trim_end().ends_with(command.trim()) {
        body = "";
    }

    // The prompt is whatever follows the last newline.
    body = match memrchr(b'\n', body.as_bytes()) {
        Some(pos) => &body[..pos],
        None => "",
    };

    body.to_string()
}

/// RiOS reports a rejected command with a first line starting with `% `.
pub fn detect_failure(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty())
        .and_then(|line| line.strip_prefix("% "))
        .map(|message| message.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_echo_and_prompt() {
        let raw = "show version\r\nProduct name:      rbt_sh\r\nProduct release:   9.0.1\r\namnesiac # ";
        assert_eq!(
            normalize_output(raw, "show version"),
            "Product name:      rbt_sh\nProduct release:   9.0.1"
        );
    }

    #[test]
    fn test_normalize_silent_command() {
        assert_eq!(normalize_output("service enable\r\namnesiac # ", "service enable"), "");
    }

    #[test]
    fn test_normalize_without_echo() {
        let raw = "Optimization Service: Running\namnesiac # ";
        assert_eq!(normalize_output(raw, "show service"), "Optimization Service: Running");
    }

    #[test]
    fn test_detect_failure() {
        assert_eq!(
            detect_failure("% Unrecognized command \"shwo\".\nType \"?\" for help."),
            Some("Unrecognized command \"shwo\".".to_string())
        );
        assert_eq!(
            detect_failure("\n  % Invalid interface name: bogus\n"),
            Some("Invalid interface name: bogus".to_string())
        );
        assert_eq!(detect_failure("Data Reduction:           93 %"), None);
    }

    #[test]
    fn test_failure_only_on_first_line() {
        let output = "Product name:      rbt_sh\n% not an error here\n";
        assert_eq!(detect_failure(output), None);
        assert_eq!(detect_failure(""), None);
    }
}
