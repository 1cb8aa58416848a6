//! Ruleset sources for each group category

pub const BLACKMATRIX7_BASE_URL: &str =
    "https://raw.githubusercontent.com/blackmatrix7/ios_rule_script/master/rule/Clash";

/// Rules appended after every category rule, the final `MATCH` catches the rest
pub const BASE_RULES: &[&str] = &[
    "DOMAIN,clash.razord.top,DIRECT",
    "DOMAIN,yacd.haishan.me,DIRECT",
    "GEOIP,LAN,DIRECT",
    "GEOIP,CN,DIRECT",
    "MATCH,🐟 漏网之鱼",
];

/// Rule types recognized when a ruleset is served as plain lines
pub const RULE_TYPES: &[&str] = &[
    "DOMAIN",
    "DOMAIN-SUFFIX",
    "DOMAIN-KEYWORD",
    "IP-CIDR",
    "IP-CIDR6",
    "GEOIP",
    "PROCESS-NAME",
    "URL-REGEX",
];

// (ruleset name, path relative to the ruleset base url)
pub const STREAMING: &[(&str, &str)] = &[
    ("netflix", "Netflix/Netflix.yaml"),
    ("youtube", "YouTube/YouTube.yaml"),
    ("spotify", "Spotify/Spotify.yaml"),
];

pub const SOCIAL: &[(&str, &str)] = &[
    ("telegram", "Telegram/Telegram.yaml"),
    ("twitter", "Twitter/Twitter.yaml"),
    ("facebook", "Facebook/Facebook.yaml"),
];

pub const AI: &[(&str, &str)] = &[
    ("openai", "OpenAI/OpenAI.yaml"),
    ("anthropic", "Anthropic/Anthropic.yaml"),
];

pub const TECHGIANTS: &[(&str, &str)] = &[
    ("apple", "Apple/Apple.yaml"),
    ("google", "Google/Google.yaml"),
    ("microsoft", "Microsoft/Microsoft.yaml"),
];

pub const GAMING: &[(&str, &str)] = &[
    ("steam", "Steam/Steam.yaml"),
    ("epicgames", "Epic/Epic.yaml"),
];

pub const FINANCE: &[(&str, &str)] = &[("paypal", "PayPal/PayPal.yaml")];

pub const SHOPPING: &[(&str, &str)] = &[
    ("amazon", "Amazon/Amazon.yaml"),
    ("taobao", "Taobao/Taobao.yaml"),
];

pub const NEWS: &[(&str, &str)] = &[("bbc", "BBC/BBC.yaml"), ("cnn", "CNN/CNN.yaml")];

pub const DEVELOPER: &[(&str, &str)] = &[
    ("github", "GitHub/GitHub.yaml"),
    ("stackoverflow", "StackOverflow/StackOverflow.yaml"),
];

pub const ADBLOCK: &[(&str, &str)] = &[
    ("advertising", "Advertising/Advertising.yaml"),
    ("privacy", "Privacy/Privacy.yaml"),
];
