use courtside_base::Rect;

use super::types::RawDetection;

/// Intersection over union of two boxes.
///
/// Disjoint boxes give 0.0, as does a pair whose union has no area.
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    let overlap_w = (a_max.x.min(b_max.x) - a_min.x.max(b_min.x)).max(0.0);
    let overlap_h = (a_max.y.min(b_max.y) - a_min.y.max(b_min.y)).max(0.0);
    let intersection = overlap_w * overlap_h;

    let union = a.area() + b.area() - intersection;
    if union <= 0.0 {
        return 0.0;
    }
    intersection / union
}

/// Greedy non-maximum suppression.
///
/// Candidates are ordered by confidence, highest first (ties keep their input
/// order). Each kept candidate removes every later one whose IoU with it is
/// strictly above `iou_threshold`.
pub fn suppress(mut candidates: Vec<RawDetection>, iou_threshold: f32) -> Vec<RawDetection> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let bounds: Vec<Rect<f32>> = candidates.iter().map(RawDetection::bounds).collect();
    let mut suppressed = vec![false; candidates.len()];

    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..candidates.len() {
            if !suppressed[j] && iou(&bounds[i], &bounds[j]) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    candidates
        .into_iter()
        .zip(suppressed)
        .filter_map(|(candidate, gone)| (!gone).then_some(candidate))
        .collect()
}
