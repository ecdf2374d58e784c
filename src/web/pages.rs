use std::fmt::Write;

use crate::models::snapshot::Snapshot;

const STYLE: &str = "body{font-family:sans-serif;margin:2em auto;max-width:70em;padding:0 1em}\
table{border-collapse:collapse;width:100%}th,td{border-bottom:1px solid #ddd;padding:.3em .5em;text-align:left}\
.barcode svg{max-width:100%;height:auto}.muted{color:#777}";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn link(href: &str, text: &str) -> String {
    if href.is_empty() {
        return escape(text);
    }
    format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
}

pub fn index(dates: &[String]) -> String {
    let mut body = String::from("<h1>Playlist history</h1>\n");
    if dates.is_empty() {
        body.push_str("<p class=\"muted\">No snapshots yet.</p>");
    } else {
        body.push_str("<p><a href=\"/current\">Current playlist</a></p>\n<ul>\n");
        for date in dates {
            let _ = writeln!(body, "<li>{}</li>", link(&format!("/playlist/{date}"), date));
        }
        body.push_str("</ul>");
    }
    layout("Playlist history", &body)
}

/// `barcode` is inline SVG markup, inserted as is. Empty means no barcode.
pub fn playlist(snapshot: &Snapshot, barcode: &str) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<p><a href=\"/\">&larr; All dates</a></p>\n<h1>{}</h1>\n\
         <p>{} &middot; {} tracks &middot; fetched {}</p>\n",
        link(&snapshot.playlist_url, &snapshot.name),
        escape(&snapshot.date),
        snapshot.total_tracks,
        escape(&snapshot.timestamp),
    );
    if !barcode.is_empty() {
        let _ = writeln!(body, "<div class=\"barcode\">{barcode}</div>");
    }

    body.push_str(
        "<table>\n<tr><th>#</th><th>Title</th><th>Artists</th><th>Album</th>\
         <th>Released</th><th>Length</th><th>ISRC</th><th>Added</th></tr>\n",
    );
    for track in &snapshot.tracks {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            track.position,
            link(&track.spotify_url, &track.name),
            escape(&track.artists),
            escape(&track.album),
            escape(&track.release_date),
            escape(&track.duration_formatted),
            escape(&track.isrc),
            escape(&track.added_at),
        );
    }
    body.push_str("</table>");

    layout(&format!("{} ({})", snapshot.name, snapshot.date), &body)
}

pub fn error(message: &str) -> String {
    let body = format!(
        "<h1>Not found</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to all dates</a></p>",
        escape(message)
    );
    layout("Not found", &body)
}
