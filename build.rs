use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features that select a vector reduction module
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    target_arch: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "avx" => 0,
            "neon" => 1,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx",
                target_arch: &["x86", "x86_64"],
                cfg_flag: "avx",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                target_arch: &["aarch64"],
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }

    fn matches_target(&self, target_arch: &str) -> bool {
        self.target_arch.iter().any(|arch| *arch == target_arch)
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    // aarch64 kernels report Advanced SIMD as "asimd"
                    "neon" => contents.contains("asimd") || contents.contains("neon"),
                    name => contents
                        .split_whitespace()
                        .any(|flag| flag == name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx" => feature.detected = contents.contains("hw.optional.avx1_0: 1"),
                    "neon" => feature.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    /// Returns `false` when no detector applies to the host, so the caller
    /// keeps every target-compatible module and relies on runtime checks.
    fn detect_cpu_features(features: &mut [CpuFeature]) -> bool {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                return true;
            }
        }

        false
    }

    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        // The scalar reduction is always compiled; `fallback` marks builds
        // without any vector module.
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("applying: {cfg_flag}");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let mut features: Vec<CpuFeature> = CpuFeature::features()
        .into_iter()
        .filter(|feature| feature.matches_target(&target_arch))
        .collect();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    let is_native_build = host == target;

    // Native builds compile only what the host CPU reports. Cross builds keep
    // the target's vector module; the runtime check still guards dispatch.
    let probed = is_native_build && PlatformDetector::detect_cpu_features(&mut features);

    if !probed {
        for feature in features.iter_mut() {
            feature.detected = true;
        }
    }

    PlatformDetector::apply(&mut features);
}
