//! xhyve argument-vector assembly.

use super::kernel::KernelConfig;
use super::spec::LaunchSpec;

/// PCI slot all virtio-blk disks attach to; the function number follows
/// the disk's position in the configured list.
const DISK_SLOT: u32 = 4;

/// Build the xhyve argument vector for a validated launch.
///
/// Emission order is fixed: memory, cpus, ACPI, platform devices, the
/// instance UUID, one virtio-blk entry per disk, the raw extra tokens
/// verbatim, and the firmware descriptor last.
pub fn build_args(spec: &LaunchSpec, kernel: &KernelConfig) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-m".into(),
        format!("{}M", spec.memory_mib),
        "-c".into(),
        spec.cpus.to_string(),
        "-A".into(),
        "-s".into(),
        "0:0,hostbridge".into(),
        "-s".into(),
        "31,lpc".into(),
        "-l".into(),
        "com1,stdio".into(),
        "-s".into(),
        "2:0,virtio-net".into(),
        "-U".into(),
        spec.instance_uuid(),
    ];

    for (function, disk) in spec.disks.iter().enumerate() {
        args.push("-s".into());
        args.push(format!(
            "{DISK_SLOT}:{function},virtio-blk,{}",
            disk.display()
        ));
    }

    args.extend(spec.extra_args.iter().cloned());

    args.push("-f".into());
    args.push(kernel.firmware());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ImageStore;
    use std::path::PathBuf;

    fn built(spec: &LaunchSpec) -> Vec<String> {
        let store = ImageStore::new("/imgs");
        let kernel = KernelConfig::build(spec, &store).unwrap();
        build_args(spec, &kernel)
    }

    #[test]
    fn test_resource_flags() {
        let spec = LaunchSpec {
            version: "773.1.0".to_string(),
            cpus: 2,
            memory_mib: 2048,
            ..Default::default()
        };
        let args = built(&spec);
        assert_eq!(&args[..4], &["-m", "2048M", "-c", "2"]);
    }

    #[test]
    fn test_one_blk_entry_per_disk_in_order() {
        let spec = LaunchSpec {
            version: "773.1.0".to_string(),
            disks: vec![PathBuf::from("/tmp/a.img"), PathBuf::from("/tmp/b.img")],
            ..Default::default()
        };
        let args = built(&spec);

        let blk: Vec<&String> = args.iter().filter(|a| a.contains("virtio-blk")).collect();
        assert_eq!(blk.len(), 2);
        assert_eq!(blk[0], "4:0,virtio-blk,/tmp/a.img");
        assert_eq!(blk[1], "4:1,virtio-blk,/tmp/b.img");
    }

    #[test]
    fn test_extra_tokens_pass_through_before_firmware() {
        let spec = LaunchSpec {
            version: "773.1.0".to_string(),
            extra_args: vec!["-s".to_string(), "5,virtio-rnd".to_string()],
            ..Default::default()
        };
        let args = built(&spec);

        let extra_at = args.iter().position(|a| a == "5,virtio-rnd").unwrap();
        let firmware_at = args.iter().position(|a| a == "-f").unwrap();
        assert!(extra_at < firmware_at);
        assert_eq!(firmware_at, args.len() - 2);
    }

    #[test]
    fn test_uuid_flag_uses_configured_value() {
        let spec = LaunchSpec {
            version: "773.1.0".to_string(),
            uuid: Some("8c9774ec-0e4c-4bbe-a696-d9e84a6d3f4f".to_string()),
            ..Default::default()
        };
        let args = built(&spec);

        let at = args.iter().position(|a| a == "-U").unwrap();
        assert_eq!(args[at + 1], "8c9774ec-0e4c-4bbe-a696-d9e84a6d3f4f");
    }

    #[test]
    fn test_end_to_end_alpha_773() {
        // channel alpha, version 773.1.0, one disk, nothing else.
        let spec = LaunchSpec {
            version: "773.1.0".to_string(),
            disks: vec![PathBuf::from("/tmp/root.img")],
            ..Default::default()
        };
        let args = built(&spec);

        assert!(args.contains(&"4:0,virtio-blk,/tmp/root.img".to_string()));
        assert_eq!(
            args.last().unwrap(),
            "kexec,/imgs/alpha.773.1.0.coreos_production_pxe.vmlinuz,\
             /imgs/alpha.773.1.0.coreos_production_pxe_image.cpio.gz,\
             earlyprintk=serial console=ttyS0 coreos.autologin root=/dev/vda"
        );
    }

    #[test]
    fn test_platform_device_flags_present() {
        let spec = LaunchSpec {
            version: "773.1.0".to_string(),
            ..Default::default()
        };
        let args = built(&spec);
        for device in ["0:0,hostbridge", "31,lpc", "com1,stdio", "2:0,virtio-net"] {
            assert!(args.contains(&device.to_string()), "missing {device}");
        }
    }
}
