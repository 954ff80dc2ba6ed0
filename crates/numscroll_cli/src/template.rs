//! Script scaffolding

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Names accepted by `numscroll new --template`
pub const TEMPLATES: [&str; 3] = ["single", "detached", "far-scroll"];

/// Write a new script from a template
pub fn create_script(path: &Path, name: &str, template: &str) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = match template {
        "single" => template_single(name),
        "detached" => template_detached(name),
        "far-scroll" => template_far_scroll(name),
        _ => anyhow::bail!(
            "Unknown template '{}'. Available templates: {}",
            template,
            TEMPLATES.join(", ")
        ),
    };

    fs::write(path, content)?;
    Ok(())
}

fn template_single(name: &str) -> String {
    format!(
        r#"# {name}: one value, dragged upward past the threshold
name = "{name}"

[scroller]
width = 50.0
height = 100.0

[scroller.single]
direction = "up"
start_value = 56.0
step = 2.0
range = {{ min = 50.0, max = 150.0 }}
scroll_distance_factor = 25.0

[[events]]
at = 0
kind = "drag_start"

[[events]]
at = 16
kind = "drag"
delta = -20.0

[[events]]
at = 32
kind = "drag"
delta = -20.0

[[events]]
at = 48
kind = "drag"
delta = -40.0

[[events]]
at = 64
kind = "drag_end"
"#
    )
}

fn template_detached(name: &str) -> String {
    format!(
        r#"# {name}: one scroller shared by three targets
name = "{name}"
link = [1, 2, 3]

[scroller]
width = 260.0
height = 20.0

[scroller.detached]
orientation = "horizontal"
direction = "right"

[scroller.default_target]
range = {{ min = -5.0, max = 5.0 }}

[[targets]]
id = 1

[[targets]]
id = 2

[targets.behavior]
step = 0.5
start_value = -5.0
scroll_distance_factor = 300.0
use_dynamic_distance_factor = true
dynamic_scaling_factor = 8.0

[[targets]]
id = 3

[targets.behavior]
step = 4.0
start_value = -4.0
range = {{ min = -12.0, max = 12.0 }}
double_tap_to_edit = true

[[events]]
at = 0
kind = "drag_start"

[[events]]
at = 16
kind = "drag"
delta = 120.0

[[events]]
at = 32
kind = "drag_end"

[[events]]
at = 100
kind = "tap"
id = 2

[[events]]
at = 110
kind = "drag_start"

[[events]]
at = 120
kind = "drag"
delta = 40.0

[[events]]
at = 130
kind = "drag"
delta = 40.0

[[events]]
at = 140
kind = "drag_end"

[[events]]
at = 200
kind = "double_tap"
id = 3

[[events]]
at = 260
kind = "edit_submit"
text = "10"
"#
    )
}

fn template_far_scroll(name: &str) -> String {
    format!(
        r#"# {name}: holding the indicator at the edge keeps stepping
name = "{name}"

[scroller]
width = 260.0
height = 20.0

[scroller.detached]
orientation = "horizontal"
direction = "right"
line_speed = 10.0
sync_indicator_with_value = false

[[targets]]
id = 1

[targets.behavior]
step = 2.0
start_value = 50.0
range = {{ min = 0.0, max = 100.0 }}
auto_increment_on_far_scroll = true
auto_increment_delay_ms = 400
far_scroll_threshold = 0.9

[[events]]
at = 0
kind = "tap"
id = 1

[[events]]
at = 10
kind = "drag_start"

[[events]]
at = 20
kind = "drag"
delta = 110.0

[[events]]
at = 410
kind = "tick"

[[events]]
at = 810
kind = "tick"

[[events]]
at = 1210
kind = "tick"

[[events]]
at = 1300
kind = "drag_end"

[[events]]
at = 2000
kind = "tick"
"#
    )
}
