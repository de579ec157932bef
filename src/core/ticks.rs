//! Tick generation for continuous scales.
//!
//! Ticks are multiples of 1, 2 or 5 times a power of ten, chosen so that
//! roughly `count` of them cover `[start, stop]`. Negative increments encode
//! the reciprocal of a sub-unit step, which keeps tick values exact for
//! decimal steps such as `0.1`.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let unit = 10f64.powf(-power) / factor;
        i1 = (start * unit).round();
        i2 = (stop * unit).round();
        if i1 / unit < start {
            i1 += 1.0;
        }
        if i2 / unit > stop {
            i2 -= 1.0;
        }
        inc = -unit;
    } else {
        let unit = 10f64.powf(power) * factor;
        i1 = (start / unit).round();
        i2 = (stop / unit).round();
        if i1 * unit < start {
            i1 += 1.0;
        }
        if i2 * unit > stop {
            i2 -= 1.0;
        }
        inc = unit;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Returns evenly spaced, human-friendly tick values in `[start, stop]`.
///
/// Reversed inputs yield reversed ticks. Non-finite inputs yield no ticks.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            if reverse {
                value(i2 - i as f64)
            } else {
                value(i1 + i as f64)
            }
        })
        .collect()
}

/// Raw tick increment; negative values are reciprocals of sub-unit steps.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Signed distance between adjacent ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let magnitude = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -magnitude } else { magnitude }
}

/// Extends a domain outward so both ends land on round tick values.
#[must_use]
pub fn nice_domain(domain: (f64, f64), count: usize) -> (f64, f64) {
    let (d0, d1) = domain;
    if !d0.is_finite() || !d1.is_finite() || count == 0 {
        return domain;
    }

    let reverse = d1 < d0;
    let (mut start, mut stop) = if reverse { (d1, d0) } else { (d0, d1) };
    let mut previous_step: Option<f64> = None;

    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reverse { (stop, start) } else { (start, stop) }
}
