//! d3-array compatible tick generation.

/// `(i1, i2, inc)` where ticks are `i * inc` for a positive `inc`, or `i / -inc` for a
/// negative one (sub-unit steps kept as integer reciprocals for exact decimals).
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    if !(count > 0.0) {
        return None;
    }
    let step = (stop - start) / count;
    if !step.is_finite() || step == 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (i1, i2, inc) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round() as i64;
        let mut i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round() as i64;
        let mut i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !inc.is_finite() || inc == 0.0 {
        return None;
    }
    Some((i1, i2, inc))
}

/// Signed tick increment for `[start, stop]` (`start <= stop`), as in `d3.tickIncrement`.
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    tick_spec(start, stop, count as f64).map(|(_, _, inc)| inc)
}

/// Roughly `count` evenly spaced, round-valued ticks within `[start, stop]`.
pub(crate) fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (a, b) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(a, b, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let at = |i: i64| {
        if inc < 0.0 {
            i as f64 / -inc
        } else {
            i as f64 * inc
        }
    };
    let mut out = (i1..=i2).map(at).collect::<Vec<_>>();
    if reverse {
        out.reverse();
    }
    out
}

/// Extend `[start, stop]` outward to round tick boundaries, as in `d3.scaleLinear().nice()`.
pub(crate) fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() {
        return (start, stop);
    }
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };

    let mut prestep: Option<f64> = None;
    for _ in 0..10 {
        let Some(step) = tick_increment(lo, hi, count) else {
            break;
        };
        if prestep == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        }
        prestep = Some(step);
    }

    if reverse { (hi, lo) } else { (lo, hi) }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/ticks.rs"]
mod tests;
