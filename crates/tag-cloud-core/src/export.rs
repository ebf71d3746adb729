use crate::model::{CloudStats, Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Layout-level metadata attached to exported JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version for the JSON layout format. Current: "1".
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub center: Point,
}

impl Meta {
    pub fn new(center: Point) -> Self {
        Meta {
            schema_version: "1".into(),
            app: "tag-cloud".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            center,
        }
    }
}

/// Serialize placed rectangles as `{ rectangles, bounds, stats, meta }`.
/// Rectangles keep placement order and carry their index.
pub fn to_json(center: Point, rectangles: &[Rect]) -> Value {
    let rects_val: Vec<Value> = rectangles
        .iter()
        .enumerate()
        .map(|(i, r)| json!({"index": i, "x": r.x, "y": r.y, "w": r.width, "h": r.height}))
        .collect();
    let stats = CloudStats::from_rects(center, rectangles);
    json!({
        "rectangles": rects_val,
        "bounds": stats.bounds,
        "stats": stats,
        "meta": Meta::new(center),
    })
}
