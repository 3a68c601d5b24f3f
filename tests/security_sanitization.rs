use std::path::Path;
use treecursor::render::{format_path, status_line, RenderConfig};

#[test]
fn test_terminal_control_chars_are_sanitized_in_rendered_output() {
    let cfg = RenderConfig {
        use_color: false,
        null_separated: false,
    };
    let rendered = format_path(Path::new("evil\u{001B}[31mname\twith\ncontrols\r"), false, &cfg);

    // No raw ESC/control chars should remain in rendered lines.
    assert!(!rendered.contains('\u{001B}'));
    assert!(!rendered.contains('\n'));
    assert!(!rendered.contains('\r'));
    assert!(!rendered.contains('\t'));

    // Escaped forms should be visible for debugging/auditing.
    assert!(rendered.contains("\\x1B"));
    assert!(rendered.contains("\\n"));
    assert!(rendered.contains("\\r"));
    assert!(rendered.contains("\\t"));

    let status = status_line("dir\u{001B}[2J", "/tmp/\u{001B}[2Jpath\twith\nnoise", false);
    assert!(!status.contains('\u{001B}'));
    assert!(!status.contains('\n'));
    assert!(!status.contains('\t'));
    assert!(status.contains("\\x1B"));
    assert!(status.contains("\\n"));
    assert!(status.contains("\\t"));
}
