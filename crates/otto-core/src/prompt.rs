//! Prompt construction for challenge generation.
//!
//! Each primary category has one template: a category intro plus tactical
//! guidance folded into a shared system frame, and a request line that goes
//! into the JSON user payload.

use indoc::indoc;
use serde::Serialize;
use serde_json::json;

use crate::catalog::is_valid_triplet;
use crate::error::PromptError;

/// Prompt pair sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system_prompt: String,
    pub user_payload: String,
}

struct Template {
    intro: &'static str,
    guidance: &'static str,
    request: &'static str,
}

const SYSTEM_FRAME: &str = indoc! {r#"
    FORMAT:
    Return JSON ONLY with keys: {"title","objective","difficulty","instructions"}
    - "title": 1–3 words.
    - "objective": 1–3 sentences; practical, actionable, and immediately usable; no bullets or lists.
    - "difficulty": a single vibe word (Calm, Focused, Fierce, Playful, Grounded, Savage, Quiet, Wild, etc.).
    - "instructions": [] (ALWAYS an empty array).

    TACTICAL STYLE:
    - Name movements, sequences, and methods the user can perform now.
    - Avoid any numbers (no counts, sets, reps, weights, times, distances, paces).
    - Favor cues like: movement order, equipment choice, range of motion, tempo words, mind–muscle targets, environment constraints.
"#};

fn template_for(field1: &str) -> Option<Template> {
    let template = match field1 {
        "weightlifting" => Template {
            intro: "You prescribe focused weight-room micro-plans the user can run today.",
            guidance: indoc! {"
                - Anchor to FIELD2 with a clear compound choice (e.g., bench press for chest, row for back, squat pattern for legs).
                - Add a FIELD3 twist as an accessory or finisher (e.g., shoulders → lateral raise or face pull; triceps → rope pressdown).
                - Use method cues instead of numbers: controlled negative, long pause at stretch, strict path, limited rest chatter, no phone.
                - Keep it one flow the user can remember: main lift → accessory → short skill/positional finisher.
            "},
            request: "Return STRICT JSON. Title 1–3 words. Objective 1–3 sentences describing a concrete session flow (main lift tied to FIELD2, accessory/finisher tied to FIELD3). No numbers.",
        },
        "bodyweight" => Template {
            intro: "You deliver bodyweight sessions with a clear movement set and technique emphasis.",
            guidance: indoc! {"
                - Let FIELD2 drive the main pattern (e.g., push → push-up variants; pull → rows/hangs; core → hollow/arch).
                - Use FIELD3 as the secondary angle (balance, pause, range, symmetry, or a specific region like shoulders/legs).
                - Provide a simple circuit feel without numbers: choose 2–3 moves, define the order, add one technique constraint.
                - Keep it location-agnostic and equipment-light.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences with a practical bodyweight flow (2–3 moves, order, technique cue). No numbers.",
        },
        "aerobics" => Template {
            intro: "You create aerobic sessions that state the mode, route feel, and a finish ritual.",
            guidance: indoc! {"
                - Tie FIELD2 to the intent (steady base, quicker cadence, powerful strides) and FIELD3 as the twist (hills, rhythm, dance feel, quiet).
                - Be explicit about the pattern: choose the route style (out-and-back, loop, track/area) and a cadence/feel cue.
                - Close with a short finish ritual (easy roll-down, stride rehearsal, breath reset). No numbers.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences with mode, route feel, cadence/attention cue, and a brief finish ritual. No numbers.",
        },
        "mobility" => Template {
            intro: "You map a compact mobility sequence for a target area.",
            guidance: indoc! {"
                - FIELD2 selects the primary region. FIELD3 sets the flavor (breath, eyes-closed, gentle oscillation, PNF tone).
                - Give a three-part flow without numbers: dynamic prep → positional hold or supported shape → easy release/retune.
                - Include one sensory or breath cue to deepen the effect.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences describing prep → position → ease for the FIELD2 area, flavored by FIELD3. No numbers.",
        },
        "rest day" => Template {
            intro: "You define a simple recovery plan that still feels intentional.",
            guidance: indoc! {"
                - Pick one anchor activity (light walk, gentle stretch, breath window).
                - Add one supportive add-on (tea ritual, brief journal line, quiet gaze).
                - Keep it restorative, practical, and clearly do-able today. No numbers.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences with one gentle activity plus one supportive add-on. No numbers.",
        },
        "sports" => Template {
            intro: "You deliver a sport session that names the skill intent and the simple drill shape.",
            guidance: indoc! {"
                - FIELD2 is the sport; FIELD3 is the skill theme (footwork, shooting rhythm, touch, vision).
                - State a single practice shape the user can run (cone pattern, wall work, solo shadow play, partner rhythm), without numbers.
                - Add one coaching cue to keep quality high.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences naming one drill shape for the FIELD2 sport with FIELD3 emphasis and a single cue. No numbers.",
        },
        "outdoors" => Template {
            intro: "You propose an outdoor session with a terrain tactic and an observation cue.",
            guidance: indoc! {"
                - FIELD2 sets the mode (hiking, cycling, etc.); FIELD3 provides the twist (elevation feel, cadence, landmark rhythm).
                - Describe the route choice (park loop, neighborhood grid, trail out-and-back) and a terrain tactic.
                - Add one observation cue (sound of footfall, tree-to-tree focus, wind direction). No numbers.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences with route choice, terrain tactic, and an observation cue. No numbers.",
        },
        "cheat day" => Template {
            intro: "You keep indulgence fun but structured with one balancing act.",
            guidance: indoc! {"
                - Name the treat context and where it fits in the day (post-meal, after training, shared with a friend).
                - Add one simple balancing gesture (brief walk, water pairing, slow savor ritual).
                - Keep it light and doable without numbers.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences that place the treat in context and include one balancing gesture. No numbers.",
        },
        "mix" => Template {
            intro: "You combine two styles into one clear, memorable combo.",
            guidance: indoc! {"
                - FIELD2 anchors the first block; FIELD3 colors the second block.
                - State a two-block flow the user can run back-to-back.
                - Add a single unifying cue (breath, posture, relaxed jaw). No numbers.
            "},
            request: "STRICT JSON. Title 1–3 words. Objective 1–3 sentences describing a two-block flow tied to FIELD2 then FIELD3, plus one unifying cue. No numbers.",
        },
        _ => return None,
    };
    Some(template)
}

/// Build the system prompt and JSON user payload for one day's selection.
///
/// # Errors
/// Fails when the triplet is not valid or `field1` has no template.
pub fn build_prompt(
    field1: &str,
    field2: &str,
    field3: &str,
    iso_date: &str,
    timezone: &str,
) -> Result<Prompt, PromptError> {
    if !is_valid_triplet(field1, field2, field3) {
        return Err(PromptError::InvalidTriplet);
    }
    let template =
        template_for(field1).ok_or_else(|| PromptError::MissingTemplate(field1.to_string()))?;

    let system_prompt = format!(
        "{}\n\n{}\nGUIDANCE:\n{}",
        template.intro, SYSTEM_FRAME, template.guidance
    );
    let user_payload = json!({
        "date": iso_date,
        "timezone": timezone,
        "variation_key": format!("{iso_date}-{timezone}"),
        "FIELD1": field1,
        "FIELD2": field2,
        "FIELD3": field3,
        "request": template.request,
    })
    .to_string();

    Ok(Prompt {
        system_prompt,
        user_payload,
    })
}
