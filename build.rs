use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features the reduction kernels have a vector path for
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == widest vector, tried first at run time
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "sse2" => 1,
            "neon" => 2,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse2",
                cfg_flag: "sse",
                detected: false,
            },
            CpuFeature {
                name: "avx2",
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                cfg_flag: "neon",
                detected: false,
            },
        ]
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

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    // arm64 kernels report NEON as "asimd"
                    "neon" => contents.contains("neon") || contents.contains("asimd"),
                    name => contents.contains(name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "sse2" => feature.detected = contents.contains("hw.optional.sse2: 1"),
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

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    /// Mask out features that cannot exist on the target architecture, so a
    /// stray substring in `/proc/cpuinfo` never compiles in foreign intrinsics.
    fn restrict_to_target(features: &mut [CpuFeature], target_arch: &str) {
        let x86 = target_arch == "x86" || target_arch == "x86_64";
        for feature in features.iter_mut() {
            match feature.name {
                "avx2" | "sse2" => feature.detected &= x86,
                "neon" => feature.detected = target_arch == "aarch64",
                _ => {}
            }
        }
    }

    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        // Every detected level is compiled in; the crate picks the widest one
        // that the running CPU also reports.
        let mut any = false;
        for feature in features.iter().filter(|f| f.detected) {
            println!("cargo:rustc-cfg={}", feature.cfg_flag);
            any = true;
        }
        if !any {
            println!("cargo:rustc-cfg=fallback");
        }

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // Only probe the CPU when the binary will run on it
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::restrict_to_target(&mut features, &target_arch);
    PlatformDetector::apply(&mut features);
}
