use super_notation_engine::{VerifyDetail, VerifyError, canonicalize, seal, sign, unseal, verify};

const DOC: &str = "<super-notation-v1>\r\ntitle: Signed\r\npara: body text\r\n";

#[test]
fn sign_seal_verify_unseal() {
    let sig = sign(DOC.as_bytes()).unwrap();
    let sealed = seal(DOC.as_bytes()).unwrap();

    let verification = verify(&sealed);
    assert!(verification.valid);
    assert!(verification.is_sealed());
    assert_eq!(verification.into_result(), Ok(sig));

    let restored = unseal(&sealed).unwrap().unwrap();
    assert_eq!(restored, DOC.as_bytes());
    assert_eq!(
        canonicalize(&restored).unwrap(),
        canonicalize(&sealed).unwrap()
    );
}

#[test]
fn canonicalization_is_idempotent_for_sealed_files() {
    let sealed = seal(DOC.as_bytes()).unwrap();
    let once = canonicalize(&sealed).unwrap();
    assert_eq!(canonicalize(&once).unwrap(), once);
}

#[test]
fn signature_survives_line_ending_conversion() {
    let sealed = String::from_utf8(seal(DOC.as_bytes()).unwrap()).unwrap();
    let crlf = sealed.replace('\n', "\r\n");
    assert!(verify(crlf.as_bytes()).valid);
}

#[test]
fn tampering_is_reported_as_mismatch() {
    let sealed = String::from_utf8(seal(DOC.as_bytes()).unwrap()).unwrap();
    let tampered = sealed.replacen("body", "bodY", 1);
    let verification = verify(tampered.as_bytes());
    assert!(!verification.valid);
    match verification.detail {
        VerifyDetail::Mismatch { expected, found } => {
            assert_ne!(expected, found);
            assert!(expected.starts_with("SHA256-"));
        }
        other => panic!("expected a mismatch, got {other:?}"),
    }
}

#[test]
fn unsigned_file_has_no_signature() {
    assert_eq!(
        verify(DOC.as_bytes()).into_result(),
        Err(VerifyError::NoSignature)
    );
    assert_eq!(unseal(DOC.as_bytes()).unwrap(), None);
}
