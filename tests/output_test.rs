use podcli::output::{ActionStatus, action_line, format_filesize, should_page};

#[test]
fn test_format_filesize() {
    assert_eq!(format_filesize(0), "0.0 bytes");
    assert_eq!(format_filesize(1023), "1023.0 bytes");
    assert_eq!(format_filesize(1536), "1.5 KB");
    assert_eq!(format_filesize(5 * 1024 * 1024), "5.0 MB");
    assert_eq!(format_filesize(1_073_741_824), "1.0 GB");
    assert_eq!(format_filesize(3 * 1024_u64.pow(4)), "3.0 TB");
}

#[test]
fn test_format_filesize_caps_at_terabytes() {
    assert_eq!(format_filesize(2048 * 1024_u64.pow(4)), "2048.0 TB");
}

#[test]
fn test_action_line_running() {
    let line = action_line("Downloading episode", ActionStatus::Running(Some(0.45)));
    assert!(line.starts_with("Downloading episode "));
    assert!(line.ends_with("[ 45.0%]"));

    let line = action_line("Updating", ActionStatus::Running(None));
    assert!(line.ends_with("[ .... ]"));
}

#[test]
fn test_action_line_is_fixed_width() {
    colored::control::set_override(false);

    let short = action_line("x", ActionStatus::Done);
    let long = action_line(&"y".repeat(200), ActionStatus::Failed);

    assert_eq!(short.chars().count(), long.chars().count());
    assert!(short.ends_with("[ DONE ]"));
    assert!(long.ends_with("[ FAIL ]"));
}

#[test]
fn test_progress_is_clamped() {
    let line = action_line("x", ActionStatus::Running(Some(1.7)));
    assert!(line.ends_with("[100.0%]"));
}

#[test]
fn test_should_page() {
    assert!(!should_page(10, Some(24)));
    assert!(should_page(24, Some(24)));
    assert!(should_page(500, Some(24)));

    // no terminal, no pager
    assert!(!should_page(500, None));
}
