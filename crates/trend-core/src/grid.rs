// File: crates/trend-core/src/grid.rs
// Summary: Tick layout helpers: "nice" step selection, domain nicing and linear tick values.

/// Step between ticks for roughly `count` ticks over [start, stop].
/// Positive values are the step itself; negative values encode `1 / -step`
/// so that sub-unit steps stay exact.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !(step > 0.0) || !step.is_finite() {
        return 0.0;
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
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Expand [start, stop] outward to multiples of the tick step.
pub fn nice(mut start: f64, mut stop: f64, count: usize) -> (f64, f64) {
    let mut prestep = 0.0;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if step == prestep || step == 0.0 {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        }
        prestep = step;
    }
    (start, stop)
}

/// Round tick values inside [start, stop], about `count` of them.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let inc = tick_increment(start, stop, count);
    if inc == 0.0 {
        return if start == stop { vec![start] } else { Vec::new() };
    }
    if inc > 0.0 {
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start { i1 += 1.0; }
        if i2 * inc > stop { i2 -= 1.0; }
        steps(i1, i2).map(|i| i * inc).collect()
    } else {
        let inv = -inc;
        let mut i1 = (start * inv).round();
        let mut i2 = (stop * inv).round();
        if i1 / inv < start { i1 += 1.0; }
        if i2 / inv > stop { i2 -= 1.0; }
        steps(i1, i2).map(|i| i / inv).collect()
    }
}

fn steps(i1: f64, i2: f64) -> impl Iterator<Item = f64> {
    let n = if i2 >= i1 { (i2 - i1) as usize + 1 } else { 0 };
    (0..n).map(move |k| i1 + k as f64)
}

/// Label for a tick value, with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let step = step.abs();
    let decimals = if step >= 1.0 || step == 0.0 {
        0
    } else {
        (-step.log10()).ceil().max(0.0) as usize
    };
    format!("{:.*}", decimals, value)
}
