//! Human-readable `detail` strings, in the dashboard's own wording.
//!
//! The store is consumed by a Chinese-language dashboard, so the rebuilt
//! descriptions stay in its voice. Formatting only — every number arrives
//! already computed.

/// Macro-series YoY, worded per series.
pub fn macro_yoy(series_id: &str, pct: f64) -> String {
    match series_id {
        "RRPONTSYD" => format!(
            "RRP YoY = {pct:+.2}%：數值越高代表更多資金停在貨幣市場，流動性被抽走，對風險資產偏空。"
        ),
        "WTREGEN" => format!(
            "TGA YoY = {pct:+.2}%：TGA 上升代表財政部把錢收回國庫，從市場抽走美元流動性；對風險資產偏空。"
        ),
        "WALCL" => format!(
            "Fed 資產負債表 YoY = {pct:+.2}%：YoY 越負代表 QT 越強，長期對 BTC / 風險資產偏空。"
        ),
        _ => format!("{series_id} YoY = {pct:+.2}%。"),
    }
}

pub fn net_liquidity(yoy_pct: f64, impulse_pct: Option<f64>, beta: Option<f64>) -> String {
    let beta_text = match beta {
        Some(b) => format!("{b:.2}"),
        None => "N/A".to_string(),
    };
    let impulse_text = match impulse_pct {
        Some(i) => format!("{i:+.2}%（近 90 日加速度）"),
        None => "N/A".to_string(),
    };
    format!(
        "Net = BS - RRP - TGA · YoY = {yoy_pct:+.2}%；{impulse_text}；\
         Beta(BTC) ≈ {beta_text}。YoY 越負代表系統性流動性在收縮。"
    )
}

pub fn stablecoin_growth(avg_pct: f64) -> String {
    format!(
        "USDT+USDC 90 日供應成長 ≈ {avg_pct:+.2}%：成長過快通常對應牛市中後段，\
         代表場內槓桿與風險偏好升溫。"
    )
}

pub fn dominance(pct: f64, floor: f64, ceiling: f64) -> String {
    format!(
        "USDT.D ≈ {pct:.3}%：約 {floor:.1}% 左右代表市場極度風險偏好、\
         穩定幣佔比偏低（接近牛市頂部）；約 {ceiling:.1}% 則代表穩定幣佔比偏高，\
         市場保守、接近底部區間。"
    )
}

pub fn etf_net_flow(total_usd: f64, window_days: usize) -> String {
    format!(
        "最近 {window_days} 日比特幣現貨 ETF 累計淨流量 ≈ {} USD。\
         持續大額淨流出（負值）代表機構在減倉，比特幣上漲動能轉弱。",
        group_thousands(total_usd)
    )
}

pub fn sentiment(value: i64) -> String {
    format!(
        "Fear & Greed = {value}：低於 20 代表極度恐慌（歷史上常見於市場底部），\
         高於 80 代表極度貪婪、追價情緒過熱。"
    )
}

pub fn price_z_score(z: f64, window_days: i64) -> String {
    format!(
        "BTC 價格 Z-Score（{window_days} 日）= {z:+.2}：大於 +2 代表價格顯著高於\
         一年均值、市場過熱；小於 -2 代表深度超跌。"
    )
}

/// Round to whole units and insert thousands separators: `1234567.8` → `"1,234,568"`.
fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}
