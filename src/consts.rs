/// Booking site hosting the occupancy widget
pub(crate) const DEFAULT_BASE_URL: &str = "https://sputnikclimbing.deporsite.net";

/// Landing page that hands out the session and anti-forgery cookies
pub(crate) const LANDING_PATH: &str = "/aforo-lasrozas";

/// AJAX endpoint returning the occupancy payload
pub(crate) const OCCUPANCY_PATH: &str =
    "/ajax/TInnova_v2/Listado_OcupacionAforo/llamadaAjax/obtenerOcupacion";

pub(crate) const XSRF_COOKIE: &str = "XSRF-TOKEN";

pub(crate) const DEFAULT_DATA_FILE: &str = "data/stats.json";
pub(crate) const DEFAULT_SECRETS_FILE: &str = "scripts/.secrets";
pub(crate) const DEFAULT_REMOTE: &str = "origin";
pub(crate) const DEFAULT_TIMEZONE: &str = "Europe/Madrid";

/// Key holding the push credential inside the secrets file
pub(crate) const TOKEN_KEY: &str = "GITHUB_TOKEN";

/// Local timestamp format used in commit messages: "2025-01-15T08:30:00"
pub(crate) const COMMIT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
