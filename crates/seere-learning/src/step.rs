//! Per-step gradient exchange.

use crate::error::Result;
use crate::link::DeviceLink;
use crate::param::{flatten, restore, Parameter};
use seere_core::{GradientCodec, StepTimings};
use tracing::trace;

/// Run one gradient exchange: flatten, move to host, pass through the
/// codec, move back, and overwrite the gradients in place.
///
/// Takes `params` by mutable borrow for the whole exchange; gradients
/// are unreadable mid-flight and hold the restored values on return.
/// Timing is accounted into `timings`: link calls as transfer, the
/// compress/decompress pair as one codec interval. The lossless
/// control skips the codec entirely so its row measures pure data
/// movement.
pub fn exchange_gradients(
    params: &mut [Parameter],
    codec: &dyn GradientCodec,
    link: &dyn DeviceLink,
    timings: &mut StepTimings,
) -> Result<()> {
    let flat = flatten(params);

    let restored = if codec.is_lossless() {
        let host = timings.time_transfer(|| link.to_host(&flat))?;
        timings.time_transfer(|| link.to_device(&host))?
    } else {
        let host = timings.time_transfer(|| link.to_host(&flat))?;
        let decoded = timings.time_codec(|| -> Result<Vec<f32>> {
            let encoded = codec.compress(&host)?;
            Ok(codec.decompress(&encoded)?)
        })?;
        timings.time_transfer(|| link.to_device(&decoded))?
    };

    restore(params, &restored)?;
    timings.record_step();

    trace!(
        mode = %codec.mode(),
        values = flat.len(),
        steps = timings.steps(),
        "gradient exchange complete"
    );
    Ok(())
}
