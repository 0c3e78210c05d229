//! End-to-end hide and reveal.
//!
//! ```text
//! hide:   message → encrypt → capacity check → bits + delimiter → embed
//! reveal: extract → bits to text → decrypt → message
//! ```

use crate::config::StegoSettings;
use crate::crypto::{decrypt_message, encrypt_message};
use crate::encoding::{binary_to_text, payload_bits};
use crate::error::{Error, Result};
use crate::stego::capacity::CapacityPlan;
use crate::stego::embed::embed;
use crate::stego::extract::{extract_with, ScanOptions};
use crate::stego::image_span;

/// Encrypt `message` with `password` and hide it in `pixels`.
///
/// The pixel buffer is only modified once the envelope is known to fit.
///
/// # Errors
///
/// - [`Error::CapacityExceeded`] if the envelope does not fit; `pixels` is
///   left untouched.
/// - [`Error::Encryption`] if the envelope could not be produced.
/// - [`Error::InvalidBuffer`] if `pixels` is shorter than `width × height × 4`.
///
/// # Example
///
/// ```
/// use ghost_pixels::{hide_message, reveal_message, StegoSettings};
///
/// let (width, height) = (64, 64);
/// let mut pixels = vec![128u8; (width * height * 4) as usize];
/// let settings = StegoSettings::default();
///
/// hide_message(&mut pixels, width, height, "meet at dawn", "hunter2", &settings).unwrap();
/// let message = reveal_message(&pixels, width, height, "hunter2", &settings).unwrap();
///
/// assert_eq!(message, "meet at dawn");
/// ```
pub fn hide_message(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    message: &str,
    password: &str,
    settings: &StegoSettings,
) -> Result<CapacityPlan> {
    image_span(pixels.len(), width, height)?;

    let envelope = encrypt_message(message, password)?;
    let plan = CapacityPlan::new(width, height, settings, &envelope);
    log::debug!(
        "capacity plan: {} of {} bits ({:.1}%)",
        plan.required_bits,
        plan.available_bits,
        plan.usage_percent()
    );

    if !plan.fits() {
        return Err(Error::CapacityExceeded {
            needed: plan.required_bits,
            available: plan.available_bits,
        });
    }

    embed(
        pixels,
        width,
        height,
        &payload_bits(&envelope),
        settings.bit_depth,
        settings.channel,
    )?;
    Ok(plan)
}

/// Extract and decrypt a message hidden with [`hide_message`].
///
/// # Errors
///
/// - [`Error::DelimiterNotFound`] if no payload is found with these settings.
/// - [`Error::Format`] if the extracted text is not an envelope.
/// - [`Error::Decryption`] on a wrong password or corrupted payload.
pub fn reveal_message(
    pixels: &[u8],
    width: u32,
    height: u32,
    password: &str,
    settings: &StegoSettings,
) -> Result<String> {
    reveal_message_with(pixels, width, height, password, settings, ScanOptions::default())
}

/// [`reveal_message`] with explicit scan tuning.
pub fn reveal_message_with(
    pixels: &[u8],
    width: u32,
    height: u32,
    password: &str,
    settings: &StegoSettings,
    options: ScanOptions,
) -> Result<String> {
    let bits = extract_with(
        pixels,
        width,
        height,
        settings.bit_depth,
        settings.channel,
        options,
    )?;
    let envelope = binary_to_text(&bits);
    decrypt_message(&envelope, password)
}
