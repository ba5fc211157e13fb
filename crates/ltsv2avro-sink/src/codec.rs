use ltsv2avro_core::Codec;

/// Map a configured codec to the one the encoder will use. `bzip2` and `xz`
/// are not supported by this build and fall back to no compression.
pub fn avro_codec(codec: Codec) -> apache_avro::Codec {
    match codec {
        Codec::Null => apache_avro::Codec::Null,
        Codec::Deflate => apache_avro::Codec::Deflate,
        Codec::Snappy => apache_avro::Codec::Snappy,
        Codec::Zstandard => apache_avro::Codec::Zstandard,
        Codec::Bzip2 | Codec::Xz => {
            tracing::warn!(%codec, "codec not supported, writing uncompressed blocks");
            apache_avro::Codec::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Codec::Null, apache_avro::Codec::Null)]
    #[case(Codec::Deflate, apache_avro::Codec::Deflate)]
    #[case(Codec::Snappy, apache_avro::Codec::Snappy)]
    #[case(Codec::Zstandard, apache_avro::Codec::Zstandard)]
    #[case(Codec::Bzip2, apache_avro::Codec::Null)]
    #[case(Codec::Xz, apache_avro::Codec::Null)]
    fn maps_codecs(#[case] configured: Codec, #[case] expected: apache_avro::Codec) {
        assert_eq!(avro_codec(configured), expected);
    }
}
