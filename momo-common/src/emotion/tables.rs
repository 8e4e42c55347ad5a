//! Static per-emotion lookup tables
//!
//! Every lookup resolves an unrecognized label to the neutral (or generic
//! default) entry. None of these functions can fail.

use super::EmotionLabel;
use serde::Serialize;

/// Poem instruction used when the emotion label is not recognized
pub const CHEER_ME_UP: &str = "cheer me up";

const POSITIVE_INSTRUCTION: &str = "loyally showcase my emotions as if you are me and have been \
through the events I described. Emphasize the positive emotions I am feeling in a tangible and \
relatable way.";

// Negative and neutral share the reframing instruction.
const REFRAMING_INSTRUCTION: &str = "for the first half of the poem, loyally showcase my emotions \
as if you are me and have been through the events I described. For the second half of the poem, \
revisit the events with a more positive mindset, for example think about how everything has a \
value and you can find beauty in small things in life. Do not write 'first half' or 'second half' \
directly in your poem. Include only the poem itself and nothing more.";

/// Musical character associated with an emotion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicFeatures {
    pub genres: &'static [&'static str],
    pub tempo: &'static str,
    pub mood: &'static str,
    pub instruments: &'static [&'static str],
}

/// Curated track used when no music generation service is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryTrack {
    pub title: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

/// Narration voice and speaking rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub voice: &'static str,
    pub speed: f64,
}

/// Background bed for narration mixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundTrack {
    /// File name under `<static_dir>/audio/background`
    pub file: &'static str,
    /// Remote copy used when the local file is missing
    pub fallback_url: &'static str,
}

const POSITIVE_LIBRARY: &[LibraryTrack] = &[
    LibraryTrack {
        title: "Morning Light",
        url: "https://www.bensound.com/bensound-music/bensound-ukulele.mp3",
        description: "Uplifting acoustic melody with gentle piano",
    },
    LibraryTrack {
        title: "Sunny Days",
        url: "https://www.bensound.com/bensound-music/bensound-happyrock.mp3",
        description: "Cheerful and optimistic tune",
    },
];

const NEGATIVE_LIBRARY: &[LibraryTrack] = &[
    LibraryTrack {
        title: "Reflection",
        url: "https://www.bensound.com/bensound-music/bensound-slowmotion.mp3",
        description: "Contemplative piano with emotional depth",
    },
    LibraryTrack {
        title: "New Dawn",
        url: "https://www.bensound.com/bensound-music/bensound-epic.mp3",
        description: "From melancholic to hopeful journey",
    },
];

const NEUTRAL_LIBRARY: &[LibraryTrack] = &[
    LibraryTrack {
        title: "Peaceful Mind",
        url: "https://www.bensound.com/bensound-music/bensound-relaxing.mp3",
        description: "Calm and soothing ambient music",
    },
    LibraryTrack {
        title: "Gentle Thoughts",
        url: "https://www.bensound.com/bensound-music/bensound-piano.mp3",
        description: "Soft piano meditation",
    },
];

impl EmotionLabel {
    /// Instruction appended to the poem prompt
    pub fn poem_instruction(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => POSITIVE_INSTRUCTION,
            EmotionLabel::Negative | EmotionLabel::Neutral => REFRAMING_INSTRUCTION,
            EmotionLabel::Unrecognized(_) => CHEER_ME_UP,
        }
    }

    /// Style prompt for music generation services
    pub fn music_style(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => "uplifting, cheerful, acoustic, piano, optimistic, major key",
            EmotionLabel::Negative => {
                "melancholic, reflective, emotional, piano, strings, minor key transitioning to hopeful"
            }
            _ => "ambient, calm, peaceful, soft piano, meditative, relaxing",
        }
    }

    pub fn music_features(&self) -> MusicFeatures {
        match self {
            EmotionLabel::Positive => MusicFeatures {
                genres: &["uplifting", "peaceful", "hopeful"],
                tempo: "moderate to fast",
                mood: "bright and warm",
                instruments: &["piano", "strings", "light percussion"],
            },
            EmotionLabel::Negative => MusicFeatures {
                genres: &["reflective", "melancholic turning hopeful"],
                tempo: "slow to moderate",
                mood: "somber transitioning to hopeful",
                instruments: &["piano", "cello", "violin"],
            },
            _ => MusicFeatures {
                genres: &["ambient", "contemplative"],
                tempo: "moderate",
                mood: "calm and balanced",
                instruments: &["piano", "soft strings", "ambient pads"],
            },
        }
    }

    /// Curated tracks for this emotion (never empty)
    pub fn music_library(&self) -> &'static [LibraryTrack] {
        match self {
            EmotionLabel::Positive => POSITIVE_LIBRARY,
            EmotionLabel::Negative => NEGATIVE_LIBRARY,
            _ => NEUTRAL_LIBRARY,
        }
    }

    pub fn voice_settings(&self) -> VoiceSettings {
        match self {
            EmotionLabel::Positive => VoiceSettings {
                voice: "nova",
                speed: 1.0,
            },
            EmotionLabel::Negative => VoiceSettings {
                voice: "onyx",
                speed: 0.9,
            },
            _ => VoiceSettings {
                voice: "shimmer",
                speed: 0.95,
            },
        }
    }

    /// Lighting description used to push image prompts towards photorealism
    pub fn image_lighting(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => {
                "warm natural lighting, golden hour, soft shadows, vibrant colors"
            }
            EmotionLabel::Negative => {
                "gentle diffused lighting, muted tones, contemplative atmosphere, soft focus"
            }
            EmotionLabel::Neutral => "balanced natural lighting, realistic colors, clear details",
            EmotionLabel::Unrecognized(_) => "natural lighting, realistic details",
        }
    }

    /// Style suffix for diffusion models
    pub fn image_style_suffix(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => ", vibrant colors, bright lighting, joyful atmosphere",
            EmotionLabel::Negative => ", soft colors, gentle lighting, contemplative mood",
            EmotionLabel::Neutral => ", natural colors, balanced lighting, peaceful scene",
            EmotionLabel::Unrecognized(_) => "",
        }
    }

    /// Keywords for the placeholder image substituted after a failed generation
    pub fn fallback_image_keywords(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => "happiness,joy,peace",
            EmotionLabel::Negative => "reflection,hope,healing",
            EmotionLabel::Neutral => "calm,serenity,peace",
            EmotionLabel::Unrecognized(_) => "memory,nostalgia",
        }
    }

    /// Leading keyword group for keyword-search placeholder images
    pub fn placeholder_keywords(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => "happiness,joy,peace",
            EmotionLabel::Negative => "reflection,contemplation,hope",
            EmotionLabel::Neutral => "calm,serenity,peaceful",
            EmotionLabel::Unrecognized(_) => "memory",
        }
    }

    pub fn background_track(&self) -> BackgroundTrack {
        match self {
            EmotionLabel::Positive => BackgroundTrack {
                file: "happy_background.mp3",
                fallback_url: "https://cdn.pixabay.com/download/audio/2022/03/10/audio_d1718ab41b.mp3",
            },
            EmotionLabel::Negative => BackgroundTrack {
                file: "calm_background.mp3",
                fallback_url: "https://cdn.pixabay.com/download/audio/2021/08/04/audio_0625c1539c.mp3",
            },
            _ => BackgroundTrack {
                file: "peaceful_background.mp3",
                fallback_url: "https://cdn.pixabay.com/download/audio/2022/05/27/audio_1808fbf07a.mp3",
            },
        }
    }
}
