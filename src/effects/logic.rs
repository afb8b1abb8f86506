use globecore::compositor::{Bloom, Fog, Lighting};

/// Atmosphere values last pushed to the renderer. Each `*_changed` call records
/// the new value and reports whether it differs from the previous one.
#[derive(Debug, Default)]
pub struct AppliedAtmosphere {
    lighting: Option<Lighting>,
    fog: Option<Fog>,
    bloom: Option<Bloom>,
}

impl AppliedAtmosphere {
    pub fn lighting_changed(&mut self, lighting: Lighting) -> bool {
        replace_if_changed(&mut self.lighting, lighting)
    }

    pub fn fog_changed(&mut self, fog: Fog) -> bool {
        replace_if_changed(&mut self.fog, fog)
    }

    pub fn bloom_changed(&mut self, bloom: Bloom) -> bool {
        replace_if_changed(&mut self.bloom, bloom)
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}
