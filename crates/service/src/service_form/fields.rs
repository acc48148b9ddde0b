//! Declarative field table of the service settings form.

use serde::Serialize;

pub const NAME: &str = "name";
pub const LINK: &str = "link";
pub const RESPECT_DNT: &str = "respect_dnt";
pub const COLLECT_IPS: &str = "collect_ips";
pub const IGNORED_IPS: &str = "ignored_ips";
pub const IGNORE_ROBOTS: &str = "ignore_robots";
pub const HIDE_REFERRER_REGEX: &str = "hide_referrer_regex";
pub const ORIGINS: &str = "origins";
pub const COLLABORATORS: &str = "collaborators";
pub const SCRIPT_INJECT: &str = "script_inject";

/// Value type a field binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Url,
    Boolean,
}

/// How a client should present the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    UrlInput,
    RadioSelect { choices: &'static [(bool, &'static str)] },
    Textarea { class: &'static str, rows: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub widget: Widget,
    pub label: &'static str,
    pub help_text: &'static str,
    pub required: bool,
}

pub const YES_NO: &[(bool, &str)] = &[(true, "Yes"), (false, "No")];

const fn text(name: &'static str, label: &'static str, help_text: &'static str) -> FieldDef {
    FieldDef { name, kind: FieldKind::Text, widget: Widget::TextInput, label, help_text, required: false }
}

const fn yes_no(name: &'static str, label: &'static str, help_text: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Boolean,
        widget: Widget::RadioSelect { choices: YES_NO },
        label,
        help_text,
        required: false,
    }
}

/// Fields in display order.
pub static SERVICE_FIELDS: [FieldDef; 10] = [
    FieldDef {
        required: true,
        ..text(NAME, "Name", "What should the service be called?")
    },
    FieldDef {
        kind: FieldKind::Url,
        widget: Widget::UrlInput,
        ..text(LINK, "Link", "What's the service's primary URL?")
    },
    yes_no(
        RESPECT_DNT,
        "Respect DNT",
        "Should visitors who have enabled <a href='https://en.wikipedia.org/wiki/Do_Not_Track'>Do Not Track</a> be excluded from all data?",
    ),
    yes_no(
        COLLECT_IPS,
        "Collect IP addresses",
        "Should individual IP addresses be collected? IP metadata (location, host, etc) will still be collected.",
    ),
    text(
        IGNORED_IPS,
        "Ignored IP addresses",
        "A comma-separated list of IP addresses or IP ranges (IPv4 and IPv6) to exclude from tracking (e.g., '192.168.0.2, 127.0.0.1/32').",
    ),
    yes_no(IGNORE_ROBOTS, "Ignore robots", "Should sessions generated by bots be excluded from tracking?"),
    text(
        HIDE_REFERRER_REGEX,
        "Hide specific referrers",
        "Any referrers that match this <a href='https://regexr.com/'>RegEx</a> will not be listed in the referrer summary. Sessions will still be tracked normally. No effect if left blank.",
    ),
    text(
        ORIGINS,
        "Allowed origins",
        "At what origins does the service operate? Use commas to separate multiple values. This sets CORS headers, so use '*' if you're not sure (or don't care).",
    ),
    text(
        COLLABORATORS,
        "Collaborators",
        "Which users on this instance should have read-only access to this service? (Comma separated list of emails.)",
    ),
    FieldDef {
        widget: Widget::Textarea { class: "font-mono", rows: 5 },
        ..text(
            SCRIPT_INJECT,
            "Additional injected JS",
            "Optional additional JavaScript to inject at the end of the tracking script. This code will be injected on every page where this service is installed.",
        )
    },
];

/// Look up a field by name.
pub fn field(name: &str) -> Option<&'static FieldDef> {
    SERVICE_FIELDS.iter().find(|f| f.name == name)
}
