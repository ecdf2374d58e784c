pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[macro_export]
macro_rules! authorization_endpoint {
    ( $base: expr, $( $x: expr),+ ) => {{
        format!("{}{}", $base.trim_end_matches('/'), format_args!($($x),+))
    }};
}

#[macro_export]
macro_rules! api_endpoint {
    ( $base: expr, $( $x: expr),+ ) => {{
        format!("{}{}", $base.trim_end_matches('/'), format_args!($($x),+))
    }};
}

#[macro_export]
macro_rules! open_spotify_url {
    ( $( $x: expr),+ ) => {{
        format!("https://open.spotify.com{}", format_args!($($x),+))
    }};
}
