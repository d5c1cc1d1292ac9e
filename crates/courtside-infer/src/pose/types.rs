use courtside_base::{Rect, Vec2};

/// Number of keypoints in COCO pose format
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// A single keypoint with 2D position and confidence score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    pub position: Vec2<f32>,
    /// Confidence score in [0.0, 1.0].
    pub confidence: f32,
}

/// COCO keypoint indices for human pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    pub fn name(self) -> &'static str {
        COCO_KEYPOINT_NAMES[self as usize]
    }
}

pub const COCO_KEYPOINT_NAMES: [&str; COCO_KEYPOINT_COUNT] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// Limb connections of the COCO skeleton.
pub const SKELETON: [(KeypointIndex, KeypointIndex); 16] = {
    use KeypointIndex::*;
    [
        (Nose, LeftEye),
        (Nose, RightEye),
        (LeftEye, LeftEar),
        (RightEye, RightEar),
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        (LeftHip, LeftKnee),
        (LeftKnee, LeftAnkle),
        (RightHip, RightKnee),
        (RightKnee, RightAnkle),
    ]
};

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

/// One decoded candidate in model input space, box in center form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    pub center: Vec2<f32>,
    pub size: Vec2<f32>,
    pub confidence: f32,
    pub keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl RawDetection {
    /// Axis-aligned extent of the candidate box.
    pub fn bounds(&self) -> Rect<f32> {
        Rect::from_center(self.center, self.size)
    }
}

/// Person box in source-frame pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

impl BoundingBox {
    pub fn rect(&self) -> Rect<f32> {
        Rect::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Vec2<f32>) -> bool {
        self.rect().contains_point(point)
    }
}

/// A detected person with bounding box and keypoints, in source-frame pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPose {
    pub bbox: BoundingBox,
    pub keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl PersonPose {
    /// Get a keypoint by its semantic index
    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }
}

/// Persons found in one frame, in suppression survivorship order.
pub type PoseResult = Vec<PersonPose>;
