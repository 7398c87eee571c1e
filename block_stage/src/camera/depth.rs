//! Depth buckets and the edge-triggered gate in front of camera-move events.

/// Default size of a depth bucket along z.
pub const DEFAULT_BUCKET_DEPTH: f32 = 1000.0;

/// Coarse depth class of a z coordinate: `ceil(z / bucket_depth)`.
pub fn depth_bucket(z: f32, bucket_depth: f32) -> i64 {
    (z / bucket_depth).ceil() as i64
}

/// Guard that lets one camera-move emission be pending at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DepthGate {
    pending: bool,
}

impl DepthGate {
    /// Arms the gate when the buckets differ and nothing is pending.
    /// Returns true when the caller must schedule an emission.
    pub fn try_arm(&mut self, current_bucket: i64, target_bucket: i64) -> bool {
        if current_bucket == target_bucket || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called once the scheduled emission has fired.
    pub fn release(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(depth_bucket(2999.0, DEFAULT_BUCKET_DEPTH), 3);
        assert_eq!(depth_bucket(3000.0, DEFAULT_BUCKET_DEPTH), 3);
        assert_eq!(depth_bucket(3001.0, DEFAULT_BUCKET_DEPTH), 4);
        assert_eq!(depth_bucket(2500.0, DEFAULT_BUCKET_DEPTH), 3);
    }

    #[test]
    fn bucket_of_negative_depth() {
        assert_eq!(depth_bucket(0.0, DEFAULT_BUCKET_DEPTH), 0);
        assert_eq!(depth_bucket(-1.0, DEFAULT_BUCKET_DEPTH), 0);
        assert_eq!(depth_bucket(-1000.0, DEFAULT_BUCKET_DEPTH), -1);
        assert_eq!(depth_bucket(-1001.0, DEFAULT_BUCKET_DEPTH), -1);
    }

    #[test]
    fn gate_arms_once_until_released() {
        let mut gate = DepthGate::default();
        assert!(!gate.try_arm(3, 3));
        assert!(gate.try_arm(3, 2));
        assert!(gate.is_pending());
        assert!(!gate.try_arm(3, 2));
        assert!(!gate.try_arm(4, 2));

        gate.release();
        assert!(gate.try_arm(3, 2));
    }
}
