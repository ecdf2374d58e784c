use std::net::IpAddr;

use rocket::http::ContentType;
use rocket::response::content::RawHtml;
use rocket::response::status::NotFound;
use rocket::serde::json::{json, Json, Value};
use rocket::{catch, catchers, get, routes, Build, Rocket, State};

use crate::barcode::{blank_svg, render_barcode, BarcodeStyle};
use crate::models::snapshot::Snapshot;
use crate::store::SnapshotStore;

pub mod pages;

type Page = Result<RawHtml<String>, NotFound<RawHtml<String>>>;

fn not_found_page(message: &str) -> NotFound<RawHtml<String>> {
    NotFound(RawHtml(pages::error(message)))
}

/// Barcode markup for `snapshot`, or `None` when there is nothing to encode.
fn barcode_markup(snapshot: &Snapshot, style: &BarcodeStyle) -> Option<String> {
    match render_barcode(snapshot, style) {
        Ok(svg) => Some(svg),
        Err(err) => {
            log::warn!("No barcode for snapshot {}: {}", snapshot.date, err);
            None
        }
    }
}

fn playlist_page(snapshot: &Snapshot, style: &BarcodeStyle) -> RawHtml<String> {
    let barcode = barcode_markup(snapshot, style).unwrap_or_default();
    RawHtml(pages::playlist(snapshot, &barcode))
}

#[get("/")]
pub fn index(store: &State<SnapshotStore>) -> RawHtml<String> {
    RawHtml(pages::index(&store.list_dates()))
}

#[get("/playlist/<date>")]
pub fn playlist(date: &str, store: &State<SnapshotStore>, style: &State<BarcodeStyle>) -> Page {
    let snapshot = store
        .load(date)
        .ok_or_else(|| not_found_page(&format!("Playlist data not found for date: {date}")))?;
    Ok(playlist_page(&snapshot, style))
}

#[get("/current")]
pub fn current(store: &State<SnapshotStore>, style: &State<BarcodeStyle>) -> Page {
    let snapshot = store
        .latest()
        .ok_or_else(|| not_found_page("No playlist data available"))?;
    Ok(playlist_page(&snapshot, style))
}

#[get("/barcode/<date>")]
pub fn barcode(
    date: &str,
    store: &State<SnapshotStore>,
    style: &State<BarcodeStyle>,
) -> Option<(ContentType, String)> {
    let snapshot = store.load(date)?;
    let svg = barcode_markup(&snapshot, style).unwrap_or_else(|| blank_svg(style));
    Some((ContentType::SVG, svg))
}

#[get("/api/dates")]
pub fn api_dates(store: &State<SnapshotStore>) -> Json<Value> {
    Json(json!({ "dates": store.list_dates() }))
}

#[get("/api/playlist/<date>")]
pub fn api_playlist(
    date: &str,
    store: &State<SnapshotStore>,
) -> Result<Json<Snapshot>, NotFound<Json<Value>>> {
    store
        .load(date)
        .map(Json)
        .ok_or_else(|| NotFound(Json(json!({ "error": "Playlist not found" }))))
}

#[catch(404)]
pub fn not_found() -> RawHtml<String> {
    RawHtml(pages::error("404 Not Found"))
}

pub fn build_rocket(store: SnapshotStore, address: IpAddr, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", port));
    rocket::custom(figment)
        .manage(store)
        .manage(BarcodeStyle::default())
        .mount(
            "/",
            routes![index, playlist, current, barcode, api_dates, api_playlist],
        )
        .register("/", catchers![not_found])
}
