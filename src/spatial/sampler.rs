use crate::config::PetalSonicEngineDesc;
use crate::math::{AXIS_DIRECTIONS, Vec3};
use crate::scene::{LayerMask, RayTracer};

/// Below this distance a sound is considered to be at the listener and never occluded.
const MIN_OCCLUSION_DISTANCE: f32 = 1e-3;

/// Cheap geometric proxies for room size and line of sight.
#[derive(Debug, Clone)]
pub struct EnvironmentSampler {
    max_reverb_distance: f32,
    max_occlusion_distance: f32,
    max_physical_volume: f32,
    ignore: LayerMask,
}

impl EnvironmentSampler {
    pub fn new(desc: &PetalSonicEngineDesc) -> Self {
        Self {
            max_reverb_distance: desc.max_reverb_distance,
            max_occlusion_distance: desc.max_occlusion_distance,
            max_physical_volume: desc.max_physical_volume,
            ignore: desc.listener_layer,
        }
    }

    /// Distances to the nearest surface along +X, -X, +Y, -Y, +Z, -Z,
    /// each capped at the reverb cutoff.
    pub fn axis_distances(&self, tracer: &dyn RayTracer, point: Vec3) -> [f32; 6] {
        AXIS_DIRECTIONS.map(|direction| {
            tracer
                .cast_ray(point, direction, self.max_reverb_distance, self.ignore)
                .map_or(self.max_reverb_distance, |hit| {
                    hit.distance.clamp(0.0, self.max_reverb_distance)
                })
        })
    }

    /// Normalized volume of the open space around `point`, in [0, 1].
    ///
    /// The six probe distances split the space into eight octant pyramids with
    /// their apex at `point`; the summed pyramid volume is divided by the
    /// configured maximum.
    pub fn physical_volume(&self, tracer: &dyn RayTracer, point: Vec3) -> f32 {
        let [pos_x, neg_x, pos_y, neg_y, pos_z, neg_z] = self.axis_distances(tracer, point);

        let mut volume = 0.0;
        for x in [pos_x, neg_x] {
            for y in [pos_y, neg_y] {
                for z in [pos_z, neg_z] {
                    volume += pyramid_volume(x, z, y);
                }
            }
        }

        let normalized = (volume / self.max_physical_volume).clamp(0.0, 1.0);
        log::debug!(
            "Physical volume at {:?}: {:.1} (normalized {:.3})",
            point,
            volume,
            normalized
        );
        normalized
    }

    /// 1.0 if anything blocks the straight line from `point` to `listener`, else 0.0.
    pub fn occlusion(&self, tracer: &dyn RayTracer, point: Vec3, listener: Vec3) -> f32 {
        let to_listener = listener - point;
        let distance = to_listener.length();
        if distance < MIN_OCCLUSION_DISTANCE {
            return 0.0;
        }

        let max_distance = distance.min(self.max_occlusion_distance);
        match tracer.cast_ray(point, to_listener / distance, max_distance, self.ignore) {
            Some(hit) if hit.distance < distance => 1.0,
            _ => 0.0,
        }
    }
}

/// Right pyramid with a `length` x `width` rectangular base.
fn pyramid_volume(length: f32, width: f32, height: f32) -> f32 {
    length * width * height / 3.0
}
