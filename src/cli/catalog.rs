//! Human-readable names and flags for currency codes.

pub struct CurrencyInfo {
    pub name: &'static str,
    pub flag: &'static str,
}

const UNKNOWN_FLAG: &str = "🌐";

pub fn lookup(code: &str) -> Option<CurrencyInfo> {
    let (name, flag) = match code {
        "TWD" => ("New Taiwan Dollar", "🇹🇼"),
        "USD" => ("US Dollar", "🇺🇸"),
        "VND" => ("Vietnamese Dong", "🇻🇳"),
        "JPY" => ("Japanese Yen", "🇯🇵"),
        "EUR" => ("Euro", "🇪🇺"),
        "CNY" => ("Chinese Yuan", "🇨🇳"),
        "KRW" => ("South Korean Won", "🇰🇷"),
        "HKD" => ("Hong Kong Dollar", "🇭🇰"),
        "AUD" => ("Australian Dollar", "🇦🇺"),
        "GBP" => ("British Pound", "🇬🇧"),
        _ => return None,
    };
    Some(CurrencyInfo { name, flag })
}

pub fn flag(code: &str) -> &'static str {
    lookup(code).map_or(UNKNOWN_FLAG, |info| info.flag)
}

/// Display name, falling back to the code itself.
pub fn name(code: &str) -> &str {
    lookup(code).map_or(code, |info| info.name)
}

/// "🇹🇼 TWD New Taiwan Dollar"
pub fn label(code: &str) -> String {
    match lookup(code) {
        Some(info) => format!("{} {code} {}", info.flag, info.name),
        None => format!("{UNKNOWN_FLAG} {code}"),
    }
}
