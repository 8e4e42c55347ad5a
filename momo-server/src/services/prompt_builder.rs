//! Prompt rendering for poem and image generation
//!
//! Both builders are pure. A profile field that is empty or `"0"` (not
//! remembered) never appears in the output.

use momo_common::profile::remembered;
use momo_common::{EmotionLabel, UserProfile};

const POEM_STYLE_GUIDANCE: &str = "You should reference poets with simple language such as \
George Orwell, but do not use vocabulary that is too archaic. Do not quote George Orwell in any \
way and do not use the word 'Orwell' in the poem. In other words, write in such a way that \
resonates with me, who is actually an Alzheimer patient, but be congruous and clear. Do not make \
up details, sensory or otherwise, that are not provided by me. Avoid using the phrase 'But wait', \
and use italics instead of asterisks to emphasize a word or phrase. Do not give the poem a title.";

const SCENE_STYLE: &str = ". A realistic memory photograph suitable for Alzheimer's patients to \
recall memories, highly detailed, emotionally resonant.";

const DEFAULT_PLACE: &str = "a peaceful place";

/// Sensory clauses ("I saw ...", "I heard ...", "I touched ...") for the
/// remembered details only
pub fn sensory_clauses(profile: &UserProfile) -> Vec<String> {
    [
        ("I saw", &profile.visual_detail),
        ("I heard", &profile.auditory_detail),
        ("I touched", &profile.tactile_detail),
    ]
    .into_iter()
    .filter_map(|(verb, value)| remembered(value).map(|detail| format!("{} {}", verb, detail)))
    .collect()
}

/// Instruction asking the text model for a personal poem
pub fn build_poem_prompt(profile: &UserProfile, emotion: &EmotionLabel) -> String {
    let mut sentences: Vec<String> = Vec::new();

    let mut identity = Vec::new();
    if let Some(gender) = remembered(&profile.gender) {
        identity.push(format!("a {}", gender));
    }
    if let Some(age) = remembered(&profile.age) {
        identity.push(format!("{} years old", age));
    }
    match (identity.is_empty(), remembered(&profile.occupation)) {
        (false, Some(occupation)) => sentences.push(format!(
            "I am {}, and my occupation is or was: {}.",
            identity.join(", "),
            occupation
        )),
        (false, None) => sentences.push(format!("I am {}.", identity.join(", "))),
        (true, Some(occupation)) => {
            sentences.push(format!("My occupation is or was: {}.", occupation))
        }
        (true, None) => {}
    }

    match (remembered(&profile.relationship), remembered(&profile.referral)) {
        (Some(relationship), Some(referral)) => sentences.push(format!(
            "I have a {} whom I refer to as {}.",
            relationship, referral
        )),
        (Some(relationship), None) => sentences.push(format!("I have a {}.", relationship)),
        (None, Some(referral)) => {
            sentences.push(format!("There is someone I refer to as {}.", referral))
        }
        (None, None) => {}
    }

    if let Some(event) = remembered(&profile.event) {
        sentences.push(format!("I experienced the following event: {}.", event));
    }
    if let Some(place) = remembered(&profile.place) {
        sentences.push(format!("This event occurred at this place: {}.", place));
    }

    let details = sensory_clauses(profile);
    if !details.is_empty() {
        sentences.push(format!("I remember these details: {}.", details.join(". ")));
    }

    if let Some(feeling) = remembered(emotion.as_str()) {
        sentences.push(format!("I am feeling {} right now.", feeling));
    }
    let instruction = emotion.poem_instruction();
    let terminator = if instruction.ends_with('.') { "" } else { "." };
    sentences.push(format!(
        "Please generate a modern poem to: {}{}",
        instruction, terminator
    ));
    sentences.push(POEM_STYLE_GUIDANCE.to_string());

    sentences.join(" ")
}

/// Scene description for image generation
pub fn build_scene_prompt(profile: &UserProfile) -> String {
    let place = remembered(&profile.place).unwrap_or(DEFAULT_PLACE);
    let mut parts = vec![format!("A memory scene at {}", place)];

    if let Some(event) = remembered(&profile.event) {
        parts.push(format!("showing the event: {}", event));
    }
    if let (Some(name), Some(relationship)) =
        (remembered(&profile.referral), remembered(&profile.relationship))
    {
        parts.push(format!("with {} ({})", name, relationship));
    }
    if let Some(visual) = remembered(&profile.visual_detail) {
        parts.push(format!("visual elements: {}", visual));
    }
    if let Some(auditory) = remembered(&profile.auditory_detail) {
        parts.push(format!("capturing the atmosphere of {}", auditory));
    }
    if let Some(tactile) = remembered(&profile.tactile_detail) {
        parts.push(format!("showing textures and materials related to {}", tactile));
    }

    let mut prompt = parts.join(", ");
    prompt.push_str(SCENE_STYLE);
    prompt
}
