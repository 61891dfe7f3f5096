use crate::error::SceneError;
use crate::ir::Scene;

/// Parse a scene document. JSON5 is accepted, so hand-written scenes may
/// carry comments and trailing commas; plain JSON parses unchanged.
pub fn parse_scene(input: &str) -> Result<Scene, SceneError> {
    let scene: Scene = json5::from_str(input)?;
    scene.validate()?;
    Ok(scene)
}
