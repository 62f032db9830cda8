/// Format a time or ratio with precision that adapts to its magnitude.
///
/// Values below 10 keep `1 - floor(log10(x))` decimals (so `4.0`, `0.50`,
/// `0.012`), larger values are rounded half-to-even to an integer.
/// Zero and negative values print as `"0"`.
pub fn basic_format(x: f64) -> String {
    if x <= 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }

    let level = x.log10().floor() as i32;
    if level < 1 {
        let decimals = (1 - level) as usize;
        format!("{:.*}", decimals, x)
    } else {
        format!("{}", x.round_ties_even() as i64)
    }
}

/// Ratio + absolute time label drawn above a bar
pub fn annotation(time_seconds: f64, baseline: f64) -> String {
    format!(
        "{}×\n{} s",
        basic_format(time_seconds / baseline),
        basic_format(time_seconds)
    )
}

fn format_size(size: f64) -> String {
    if size.fract() == 0.0 && size.abs() < 1e15 {
        format!("{}", size as i64)
    } else {
        format!("{}", size)
    }
}

/// Substitute the problem size into a title template such as `"{:d} points"`.
///
/// The first `{...}` placeholder is replaced; a template without one is
/// returned unchanged.
pub fn format_size_title(template: &str, size: f64) -> String {
    let Some(start) = template.find('{') else {
        return template.to_string();
    };
    let Some(len) = template[start..].find('}') else {
        return template.to_string();
    };

    let end = start + len + 1;
    format!(
        "{}{}{}",
        &template[..start],
        format_size(size),
        &template[end..]
    )
}
