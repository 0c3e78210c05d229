//! Advisory settings recommender.
//!
//! Suggests a bit depth and channel from free-text descriptions of the
//! message, the cover image and the intended use. Suggestions are never
//! trusted for correctness: they are validated into [`StegoSettings`] and the
//! capacity planner still has the final word.
//!
//! An external text-generation service can be driven with
//! [`render_prompt`] and its JSON reply read with [`parse_recommendation`].
//! [`HeuristicAdvisor`] gives a deterministic answer offline.

use crate::config::{BitDepth, ChannelSet, StegoSettings};
use crate::error::{Error, Result};
use crate::stego::capacity::max_message_len;
use serde::{Deserialize, Serialize};

/// What the advisor is told about the job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorRequest {
    /// Description of the message content.
    pub text_description: String,
    /// Description of the cover image.
    pub image_description: String,
    /// Intended use, e.g. archiving or covert communication.
    pub use_case: String,
}

/// A suggested configuration with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended_bit_depth: u8,
    pub recommended_color_channel: String,
    pub rationale: String,
}

impl Recommendation {
    /// Validate into settings. The channel name must be R, G, B or RGB.
    pub fn to_settings(&self) -> Result<StegoSettings> {
        Ok(StegoSettings {
            bit_depth: BitDepth::new(self.recommended_bit_depth)?,
            channel: self.recommended_color_channel.parse()?,
        })
    }
}

/// Source of setting suggestions.
pub trait SettingsAdvisor {
    fn recommend(&self, request: &AdvisorRequest) -> Result<Recommendation>;
}

/// Prompt text for an external text-generation service.
pub fn render_prompt(request: &AdvisorRequest) -> String {
    format!(
        "You are an expert in steganography settings. Based on the following information, \
recommend the optimal steganography settings to maximize message capacity and minimize \
visual artifacts.

Text description: {}
Image description: {}
Use case: {}

Considerations:
*   Bit depth: Higher bit depth allows for larger messages but increases the risk of visual artifacts.
*   Color channel: Different color channels have different sensitivities to changes. Some channels might be better for hiding data than others.
*   Use case: The intended use case affects the tolerance for visual artifacts. Covert communication requires minimal artifacts, while archiving might allow for more noticeable changes.

Reply with a JSON object with the fields \"recommendedBitDepth\" (1-8), \
\"recommendedColorChannel\" (one of R, G, B, RGB) and \"rationale\".
",
        request.text_description, request.image_description, request.use_case
    )
}

/// Parse a service reply, tolerating prose or code fences around the JSON.
pub fn parse_recommendation(reply: &str) -> Result<Recommendation> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            return Err(Error::InvalidSettings(
                "advisor reply contains no JSON object".to_string(),
            ))
        }
    };

    let recommendation: Recommendation = serde_json::from_str(json)?;
    recommendation.to_settings()?;
    Ok(recommendation)
}

/// Rule-based advisor driven by keywords in the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAdvisor;

const COVERT_WORDS: &[&str] = &["covert", "secret", "private", "communication", "hidden"];
const BULK_WORDS: &[&str] = &["archiv", "backup", "storage", "bulk", "large"];
const BUSY_IMAGE_WORDS: &[&str] = &["noisy", "noise", "texture", "detailed", "photo", "grain"];
const FLAT_IMAGE_WORDS: &[&str] = &["flat", "logo", "screenshot", "diagram", "gradient", "sky"];

fn mentions(text: &str, words: &[&str]) -> bool {
    let text = text.to_lowercase();
    words.iter().any(|word| text.contains(word))
}

impl SettingsAdvisor for HeuristicAdvisor {
    fn recommend(&self, request: &AdvisorRequest) -> Result<Recommendation> {
        let covert = mentions(&request.use_case, COVERT_WORDS);
        let bulk = mentions(&request.use_case, BULK_WORDS)
            || mentions(&request.text_description, BULK_WORDS);
        let busy = mentions(&request.image_description, BUSY_IMAGE_WORDS);
        let flat = mentions(&request.image_description, FLAT_IMAGE_WORDS);

        let (bit_depth, channel, rationale) = if covert {
            let (depth, why) = if busy && !flat {
                (2, "the busy image masks a second low bit")
            } else {
                (1, "a single low bit keeps changes below visible noise")
            };
            (
                depth,
                ChannelSet::Blue,
                format!(
                    "Covert use calls for minimal artifacts: the eye is least sensitive \
to blue, and {}.",
                    why
                ),
            )
        } else if bulk {
            let depth = if flat { 2 } else { 3 };
            (
                depth,
                ChannelSet::Rgb,
                format!(
                    "Archival use tolerates visible change, so all three channels at {} bits \
maximise capacity.",
                    depth
                ),
            )
        } else if flat {
            (
                1,
                ChannelSet::Blue,
                "Flat regions show LSB changes easily; one bit in blue is the safest choice."
                    .to_string(),
            )
        } else {
            (
                1,
                ChannelSet::Rgb,
                "One bit across RGB balances capacity against visibility for general use."
                    .to_string(),
            )
        };

        log::debug!("heuristic advisor chose {} bits in {}", bit_depth, channel);
        Ok(Recommendation {
            recommended_bit_depth: bit_depth,
            recommended_color_channel: channel.name().to_string(),
            rationale,
        })
    }
}

/// Least intrusive settings whose capacity admits a `plaintext_len` byte message.
///
/// Candidates are tried from one bit in a single channel upward; returns
/// `None` if even eight bits in all channels are too small.
pub fn smallest_fitting(width: u32, height: u32, plaintext_len: usize) -> Option<StegoSettings> {
    (BitDepth::MIN..=BitDepth::MAX)
        .flat_map(|bits| [(bits, ChannelSet::Blue), (bits, ChannelSet::Rgb)])
        .filter_map(|(bits, channel)| StegoSettings::new(bits, channel).ok())
        .find(|settings| max_message_len(width, height, settings) >= plaintext_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, image: &str, use_case: &str) -> AdvisorRequest {
        AdvisorRequest {
            text_description: text.to_string(),
            image_description: image.to_string(),
            use_case: use_case.to_string(),
        }
    }

    #[test]
    fn test_prompt_includes_request() {
        let prompt = render_prompt(&request("a short note", "beach photo", "archiving"));
        assert!(prompt.contains("Text description: a short note"));
        assert!(prompt.contains("Image description: beach photo"));
        assert!(prompt.contains("Use case: archiving"));
        assert!(prompt.contains("recommendedBitDepth"));
    }

    #[test]
    fn test_parse_plain_json() {
        let reply = r#"{"recommendedBitDepth": 2, "recommendedColorChannel": "B", "rationale": "ok"}"#;
        let recommendation = parse_recommendation(reply).unwrap();
        assert_eq!(recommendation.recommended_bit_depth, 2);

        let settings = recommendation.to_settings().unwrap();
        assert_eq!(settings.bit_depth.get(), 2);
        assert_eq!(settings.channel, ChannelSet::Blue);
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "Here you go:\n```json\n{\"recommendedBitDepth\": 1, \
\"recommendedColorChannel\": \"RGB\", \"rationale\": \"balanced\"}\n```";
        let recommendation = parse_recommendation(reply).unwrap();
        assert_eq!(recommendation.rationale, "balanced");
    }

    #[test]
    fn test_parse_rejects_invalid_settings() {
        let depth = r#"{"recommendedBitDepth": 12, "recommendedColorChannel": "R", "rationale": ""}"#;
        assert!(parse_recommendation(depth).is_err());

        let channel =
            r#"{"recommendedBitDepth": 1, "recommendedColorChannel": "Alpha", "rationale": ""}"#;
        assert!(parse_recommendation(channel).is_err());

        assert!(parse_recommendation("no json here").is_err());
    }

    #[test]
    fn test_heuristic_covert() {
        let advisor = HeuristicAdvisor;
        let rec = advisor
            .recommend(&request("password list", "flat blue sky", "covert communication"))
            .unwrap();
        assert_eq!(rec.recommended_bit_depth, 1);
        assert_eq!(rec.recommended_color_channel, "B");

        let busy = advisor
            .recommend(&request("note", "noisy night photo", "secret drop"))
            .unwrap();
        assert_eq!(busy.recommended_bit_depth, 2);
    }

    #[test]
    fn test_heuristic_archive() {
        let rec = HeuristicAdvisor
            .recommend(&request("large document", "landscape", "archiving"))
            .unwrap();
        assert_eq!(rec.recommended_bit_depth, 3);
        assert_eq!(rec.recommended_color_channel, "RGB");
    }

    #[test]
    fn test_heuristic_output_is_valid() {
        let rec = HeuristicAdvisor.recommend(&AdvisorRequest::default()).unwrap();
        assert!(rec.to_settings().is_ok());
        assert!(!rec.rationale.is_empty());
    }

    #[test]
    fn test_smallest_fitting() {
        let first = smallest_fitting(100, 100, 10).unwrap();
        assert_eq!(first, StegoSettings::new(1, ChannelSet::Blue).unwrap());

        let wider = smallest_fitting(100, 100, 2000).unwrap();
        assert!(max_message_len(100, 100, &wider) >= 2000);

        assert_eq!(smallest_fitting(2, 2, 1000), None);
    }
}
