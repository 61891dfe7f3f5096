use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse scene: {0}")]
    Parse(#[from] json5::Error),
    #[error("duplicate shape id '{0}'")]
    DuplicateShape(String),
    #[error("shape '{id}' has invalid geometry (x={x}, y={y}, width={width}, height={height})")]
    InvalidShape {
        id: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    #[error("connector '{connector}' references unknown shape '{shape}'")]
    UnknownShape { connector: String, shape: String },
    #[error("connector '{connector}' has distance {distance} outside [0, 1]")]
    DistanceOutOfRange { connector: String, distance: f32 },
}
