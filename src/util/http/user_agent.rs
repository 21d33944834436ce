use rand::Rng;

const CHROME_VERSIONS: [&str; 12] = [
    "133.0.6943.60", "133.0.6943.88", "132.0.6834.83", "132.0.6834.110", "131.0.6778.85",
    "131.0.6778.108", "130.0.6723.92", "130.0.6723.117", "129.0.6668.89", "128.0.6613.138",
    "127.0.6533.119", "126.0.6478.182",
];

const FIREFOX_VERSIONS: [&str; 8] = [
    "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0",
];

const EDGE_VERSIONS: [&str; 6] = [
    "133.0.3048.56", "132.0.2957.63", "131.0.2903.112", "130.0.2849.80", "129.0.2792.65",
    "128.0.2739.90",
];

/// 只使用桌面平台，行動版頁面的結構與桌面版不同
const DESKTOP_OS: [&str; 8] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 14_7_1",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
    "Windows NT 10.0; WOW64",
];

fn gen_chrome_ua(rng: &mut impl Rng) -> String {
    let version = CHROME_VERSIONS[rng.random_range(0..CHROME_VERSIONS.len())];
    let os = DESKTOP_OS[rng.random_range(0..DESKTOP_OS.len())];

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        os, version
    )
}

fn gen_firefox_ua(rng: &mut impl Rng) -> String {
    let version = FIREFOX_VERSIONS[rng.random_range(0..FIREFOX_VERSIONS.len())];
    let os = DESKTOP_OS[rng.random_range(0..DESKTOP_OS.len())];

    format!(
        "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
        os, version, version
    )
}

fn gen_edge_ua(rng: &mut impl Rng) -> String {
    let version = EDGE_VERSIONS[rng.random_range(0..EDGE_VERSIONS.len())];
    // Edge 只跑在 Windows 與 macOS
    let os = DESKTOP_OS[rng.random_range(0..5)];
    let chrome_ver = version.split('.').next().unwrap_or("133");

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36 Edg/{}",
        os, chrome_ver, version
    )
}

/// 隨機產生桌面瀏覽器的 User-Agent，Chrome 佔多數
pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    match rng.random_range(0..10) {
        0..=5 => gen_chrome_ua(&mut rng),
        6..=7 => gen_firefox_ua(&mut rng),
        _ => gen_edge_ua(&mut rng),
    }
}
