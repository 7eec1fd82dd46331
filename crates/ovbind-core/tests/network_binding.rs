//! Executable network binding contract, checked against a recording stub.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod stub_native;

use std::sync::Arc;

use ovbind_core::handle::NetworkKind;
use ovbind_core::{
    ExecutableNetwork, Handle, NativeAddr, NativeApi, NativeWrapper, ObjectKind, StatusCode,
};

use stub_native::{Call, StubNative};

const NET: usize = 0x7f00_1000;

fn network(stub: &Arc<StubNative>) -> ExecutableNetwork {
    let api: Arc<dyn NativeApi> = stub.clone();
    ExecutableNetwork::from_handle(api, Handle::<NetworkKind>::from_addr(NativeAddr::new(NET)))
}

#[test]
fn construction_makes_no_native_call_and_keeps_handle() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    let net = network(&stub);

    assert_eq!(net.addr(), NativeAddr::new(NET));
    assert_eq!(net.handle().kind(), ObjectKind::ExecutableNetwork);
    assert!(stub.calls().is_empty());

    let _ = net.into_raw();
}

#[test]
fn construction_accepts_any_address() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    let api: Arc<dyn NativeApi> = stub.clone();
    let net = ExecutableNetwork::from_handle(api, Handle::from_addr(NativeAddr::new(0)));
    assert_eq!(net.addr().get(), 0);
    assert!(stub.calls().is_empty());
    let _ = net.into_raw();
}

#[test]
fn create_infer_request_wraps_native_return_value() {
    let stub = Arc::new(StubNative::new(0xdead_0010, 0x30));
    let net = network(&stub);

    let req = net.create_infer_request().unwrap();
    assert_eq!(req.addr(), NativeAddr::new(0xdead_0010));
    assert_eq!(req.handle().kind(), ObjectKind::InferRequest);
    assert_eq!(
        stub.calls(),
        vec![Call::CreateInferRequest(NativeAddr::new(NET))]
    );

    let _ = req.into_raw();
    let _ = net.into_raw();
}

#[test]
fn get_metric_passes_name_through_and_wraps_result() {
    let stub = Arc::new(StubNative::new(0x20, 0xbeef_0040));
    let net = network(&stub);

    let param = net.get_metric("OPTIMAL_NUMBER_OF_INFER_REQUESTS").unwrap();
    assert_eq!(param.addr(), NativeAddr::new(0xbeef_0040));
    assert_eq!(
        stub.calls(),
        vec![Call::GetMetric(
            NativeAddr::new(NET),
            "OPTIMAL_NUMBER_OF_INFER_REQUESTS".to_string()
        )]
    );

    // no local validation of the name either
    let odd = net.get_metric("").unwrap();
    assert_eq!(odd.addr(), NativeAddr::new(0xbeef_0040));

    let _ = param.into_raw();
    let _ = odd.into_raw();
    let _ = net.into_raw();
}

#[test]
fn native_failure_surfaces_unchanged() {
    let mut stub = StubNative::new(0x20, 0x30);
    stub.fail_metric = true;
    let stub = Arc::new(stub);
    let net = network(&stub);

    let err = net.get_metric("NOPE").unwrap_err();
    assert_eq!(err.status(), StatusCode::NotFound);
    assert_eq!(err.to_string(), "not found: unsupported metric: NOPE");

    let _ = net.into_raw();
}

#[test]
fn explicit_delete_releases_once_with_network_kind() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    let net = network(&stub);

    net.delete().unwrap();
    assert_eq!(
        stub.deletes(),
        vec![(ObjectKind::ExecutableNetwork, NativeAddr::new(NET))]
    );
}

#[test]
fn delete_error_is_returned_to_caller() {
    let mut stub = StubNative::new(0x20, 0x30);
    stub.fail_delete = true;
    let stub = Arc::new(stub);

    let err = network(&stub).delete().unwrap_err();
    assert_eq!(err.status(), StatusCode::NotAllocated);
    assert_eq!(stub.deletes().len(), 1);
}

#[test]
fn drop_releases_live_objects() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    {
        let net = network(&stub);
        let _req = net.create_infer_request().unwrap();
        let _param = net.get_metric("NETWORK_NAME").unwrap();
    }

    let mut deletes = stub.deletes();
    deletes.sort();
    assert_eq!(
        deletes,
        vec![
            (ObjectKind::ExecutableNetwork, NativeAddr::new(NET)),
            (ObjectKind::InferRequest, NativeAddr::new(0x20)),
            (ObjectKind::Parameter, NativeAddr::new(0x30)),
        ]
    );
}

#[test]
fn into_raw_never_deletes() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    let handle = network(&stub).into_raw();
    assert_eq!(handle.addr(), NativeAddr::new(NET));
    assert!(stub.deletes().is_empty());
}

#[test]
fn request_outlives_network_wrapper() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    let net = network(&stub);
    let req = net.create_infer_request().unwrap();
    net.delete().unwrap();

    assert_eq!(req.addr(), NativeAddr::new(0x20));
    req.delete().unwrap();
    assert_eq!(
        stub.deletes(),
        vec![
            (ObjectKind::ExecutableNetwork, NativeAddr::new(NET)),
            (ObjectKind::InferRequest, NativeAddr::new(0x20)),
        ]
    );
}

#[test]
fn optional_entry_points_default_to_not_implemented() {
    let stub = Arc::new(StubNative::new(0x20, 0x30));
    let net = network(&stub);

    let req = net.create_infer_request().unwrap();
    assert_eq!(req.infer().unwrap_err().status(), StatusCode::NotImplemented);

    let param = net.get_metric("NETWORK_NAME").unwrap();
    assert_eq!(param.value().unwrap_err().status(), StatusCode::NotImplemented);

    let api: Arc<dyn NativeApi> = stub.clone();
    let err = ovbind_core::Core::new(api).unwrap_err();
    assert_eq!(err.status(), StatusCode::NotImplemented);
}
