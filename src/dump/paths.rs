//! Installer endpoints that need special handling
//!
//! These lists are static for the life of the process.

/// Reports whether zFCP hardware is present
pub const ZFCP_SUPPORTED_PATH: &str = "/api/storage/zfcp/supported";

/// Reports whether DASD hardware is present
pub const DASD_SUPPORTED_PATH: &str = "/api/storage/dasd/supported";

/// List of network connections, each with an `id`
pub const NETWORK_CONNECTIONS_PATH: &str = "/api/network/connections";

/// Storage product parameters, including `mountPoints`
pub const PRODUCT_PARAMS_PATH: &str = "/api/storage/product/params";

/// Default volume for a mount point; needs `mount_path`
pub const VOLUME_FOR_PATH: &str = "/api/storage/product/volume_for";

/// Software configuration, including the selected `product`
pub const SOFTWARE_CONFIG_PATH: &str = "/api/software/config";

/// Localization settings; PATCH target for locale switching
pub const L10N_CONFIG_PATH: &str = "/api/l10n/config";

/// UI languages offered by the web frontend
pub const LANGUAGES_PATH: &str = "/languages.json";

/// Never requested during the bulk pass
pub const SKIP_PATHS: &[&str] = &[
    // recorded by the capability probes
    ZFCP_SUPPORTED_PATH,
    DASD_SUPPORTED_PATH,
    // resolved with a synthesized query parameter
    VOLUME_FOR_PATH,
    // builds a log archive
    "/api/manager/logs/store",
    // websocket upgrade
    "/api/ws",
];

/// Responses that depend on the UI locale
pub const LOCALIZED_PATHS: &[&str] = &[
    "/api/l10n/keymaps",
    "/api/l10n/locales",
    "/api/l10n/timezones",
    "/api/software/patterns",
    "/api/software/products",
];

/// Valid endpoints missing from the OpenAPI documents
pub const EXTRA_PATHS: &[&str] = &["/api/storage/devices/dirty", "/api/storage/proposal/settings/"];
