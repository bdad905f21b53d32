//! HTML views for the form UI.
//!
//! Small string builders instead of a template engine: the whole surface
//! is a handful of pages. All interpolated user input goes through
//! [`esc`].

use notelet_db::models::page::{Page, PageDraft};

use pulldown_cmark_escape::escape_html;

/// Escape text for interpolation into HTML bodies and double-quoted
/// attributes.
fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let _ = escape_html(&mut out, text);
    out
}

/// Shared document skeleton.
fn layout(title: &str, body: &str) -> String {
    let mut doc = String::with_capacity(body.len() + 256);
    doc.push_str("<!DOCTYPE html>\n");
    doc.push_str("<html lang=\"en\">\n");
    doc.push_str("<head>\n");
    doc.push_str("<meta charset=\"utf-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    doc.push_str(&format!("<title>{}</title>\n", esc(title)));
    doc.push_str("<link rel=\"stylesheet\" href=\"/static/style.css\">\n");
    doc.push_str("</head>\n");
    doc.push_str("<body>\n");
    doc.push_str(body);
    doc.push_str("</body>\n");
    doc.push_str("</html>\n");
    doc
}

/// Site header shown on the home and informational pages.
fn site_header(out: &mut String) {
    out.push_str("<h1><a href=\"/\">notelet</a></h1>\n");
    out.push_str("<p>Simple text web pages</p>\n");
    out.push_str("<p>\n");
    out.push_str("    <a href=\"/about\">What is notelet?</a><br>\n");
    out.push_str("    <a href=\"/howto\">How to use notelet?</a>\n");
    out.push_str("</p>\n");
}

fn error_banner(out: &mut String, errmsg: Option<&str>) {
    if let Some(msg) = errmsg {
        out.push_str("    <div class=\"pageform_error\">\n");
        out.push_str(&format!("        <p>{}</p>\n", esc(msg)));
        out.push_str("    </div>\n");
    }
}

fn text_input(out: &mut String, name: &str, label: &str, value: &str) {
    out.push_str("    <div>\n");
    out.push_str(&format!("        <label for=\"{name}\">{label}</label>\n"));
    out.push_str(&format!(
        "        <input id=\"{name}\" name=\"{name}\" value=\"{}\">\n",
        esc(value)
    ));
    out.push_str("    </div>\n");
}

fn content_input(out: &mut String, value: &str) {
    out.push_str("    <div>\n");
    out.push_str("        <label for=\"content\">Content</label>\n");
    out.push_str(&format!(
        "        <textarea id=\"content\" name=\"content\">{}</textarea>\n",
        esc(value)
    ));
    out.push_str("    </div>\n");
}

fn save_button(out: &mut String) {
    out.push_str("    <div class=\"pageform_save\">\n");
    out.push_str("        <button type=\"submit\">Save</button>\n");
    out.push_str("    </div>\n");
    out.push_str("</form>\n");
}

/// The create-page form, optionally with an error banner and the user's
/// previous input preserved.
pub fn new_page_form(draft: &PageDraft, errmsg: Option<&str>) -> String {
    let mut body = String::new();
    site_header(&mut body);
    body.push_str("<h2>Create a page</h2>\n");
    body.push_str("<form class=\"pageform\" method=\"post\" action=\"/\">\n");
    error_banner(&mut body, errmsg);
    text_input(&mut body, "title", "Title", &draft.title);
    content_input(&mut body, &draft.content);
    text_input(&mut body, "author", "Author (optional)", &draft.author);
    text_input(&mut body, "url", "Custom URL (optional)", &draft.url);
    text_input(
        &mut body,
        "editcode",
        "Custom edit code (optional)",
        &draft.edit_code,
    );
    save_button(&mut body);
    layout("Create a page", &body)
}

/// One-time success page: links to the new page and its edit form, and the
/// only display of the edit code there will ever be.
pub fn create_success(page: &Page) -> String {
    let url = esc(&page.url);
    let mut body = String::new();
    body.push_str("<h2>You made a page.</h2>\n");
    body.push_str("<p>The link to your page is here:</p>\n");
    body.push_str(&format!("<p><a href=\"/{url}\">/{url}</a></p>\n"));
    body.push_str("<p>Edit your page here:</p>\n");
    body.push_str(&format!("<p><a href=\"/{url}/edit\">/{url}/edit</a></p>\n"));
    body.push_str("<p>You will need this code to make changes to this page in the future:</p>\n");
    body.push_str(&format!(
        "<p>Your edit code: <b>{}</b></p>\n",
        esc(&page.edit_code)
    ));
    body.push_str("<p>Keep this info safe. It cannot be accessed again!</p>\n");
    body.push_str("<p><a href=\"/\">notelet home</a></p>\n");
    layout("Success", &body)
}

/// A rendered page, with the markdown body already converted to HTML.
pub fn page_view(page: &Page, rendered_body: &str) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"page_body\">\n");
    body.push_str(rendered_body);
    body.push_str("</div>\n");
    if !page.author.is_empty() {
        body.push_str(&format!(
            "<p class=\"page_author\">by {}</p>\n",
            esc(&page.author)
        ));
    }
    body.push_str(&format!(
        "<p class=\"page_footer\"><a href=\"/{}/edit\">edit</a> &middot; <a href=\"/\">notelet</a></p>\n",
        esc(&page.url)
    ));
    layout(&page.title, &body)
}

/// The edit form for the page at `current_url`, optionally with an error
/// banner and the user's attempted input preserved.
pub fn edit_page_form(current_url: &str, draft: &PageDraft, errmsg: Option<&str>) -> String {
    let mut body = format!("<h2>Edit /{}</h2>\n", esc(current_url));
    body.push_str(&format!(
        "<form class=\"pageform\" method=\"post\" action=\"/{}/edit\">\n",
        esc(current_url)
    ));
    error_banner(&mut body, errmsg);
    text_input(&mut body, "title", "Title", &draft.title);
    content_input(&mut body, &draft.content);
    text_input(&mut body, "author", "Author (optional)", &draft.author);
    text_input(
        &mut body,
        "url",
        "URL (leave empty to derive from title)",
        &draft.url,
    );
    // The edit code is never pre-filled.
    text_input(&mut body, "editcode", "Edit code", "");
    save_button(&mut body);
    layout("Edit", &body)
}

/// `GET /howto` — the usage notes.
pub fn howto() -> String {
    let mut body = String::new();
    site_header(&mut body);
    body.push_str("<h2>How to use notelet</h2>\n");
    body.push_str("<p>Write a title and some content, then press Save. Content is markdown:\n");
    body.push_str("headings, lists, links, emphasis and tables all work, and single line\n");
    body.push_str("breaks are kept.</p>\n");
    body.push_str("<p>You can pick a custom URL and a custom edit code, or leave either\n");
    body.push_str("empty to have them chosen for you. The edit code is shown exactly once,\n");
    body.push_str("on the page you see after saving &mdash; note it down, it is the only\n");
    body.push_str("way to change your page later.</p>\n");
    body.push_str("<p>Pages that nobody reads for a long time are deleted.</p>\n");
    layout("How to", &body)
}

/// `GET /about` — what this is.
pub fn about() -> String {
    let mut body = String::new();
    site_header(&mut body);
    body.push_str("<h2>What is notelet?</h2>\n");
    body.push_str("<p>notelet hosts simple text pages. No accounts, no tracking: you write\n");
    body.push_str("a page, you get a link to share and a code to edit it with, and that's\n");
    body.push_str("the whole deal.</p>\n");
    layout("About", &body)
}

/// A standalone error page.
pub fn error_page(title: &str, message: &str) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h2>{}</h2>\n", esc(title)));
    body.push_str(&format!("<p>{}</p>\n", esc(message)));
    body.push_str("<p><a href=\"/\">notelet home</a></p>\n");
    layout(title, &body)
}
