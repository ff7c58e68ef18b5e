//! src/render/sampling.rs
//!
//! Stride-based down-sampling so a frame never draws more than `max_points`.

/// Keep every `step`-th item where `step = ceil(len / max_points)`.
///
/// `None` disables down-sampling; `Some(0)` is treated as `Some(1)`.
pub fn downsample<'a, T, I>(data: I, max_points: Option<usize>) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: ExactSizeIterator,
{
    let iter = data.into_iter();
    let len = iter.len();
    match max_points {
        Some(max) if len > max.max(1) => iter.step_by(len.div_ceil(max.max(1))).collect(),
        _ => iter.collect(),
    }
}
