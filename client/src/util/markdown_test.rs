use super::render_markdown_html;

#[test]
fn renders_emphasis_and_code() {
    let out = render_markdown_html("some *emphasis* and `code`");
    assert!(out.contains("<em>emphasis</em>"));
    assert!(out.contains("<code>code</code>"));
}

#[test]
fn drops_raw_html_blocks() {
    let out = render_markdown_html("before\n\n<script>alert(1)</script>\n\nafter");
    assert!(!out.contains("<script>"));
    assert!(out.contains("before"));
    assert!(out.contains("after"));
}

#[test]
fn drops_inline_html() {
    let out = render_markdown_html("click <img src=x onerror=alert(1)> here");
    assert!(!out.contains("onerror"));
    assert!(out.contains("click"));
}

#[test]
fn renders_lists() {
    let out = render_markdown_html("- one\n- two");
    assert!(out.contains("<ul>"));
    assert!(out.contains("<li>one</li>"));
}
