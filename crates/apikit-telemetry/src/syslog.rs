use std::io;
use std::net::UdpSocket;

/// Fire-and-forget syslog sink: one formatted line per UDP datagram
///
/// Delivery is best-effort, as with any UDP syslog transport. Send errors
/// surface through the non-blocking writer's error counter rather than
/// failing the caller.
pub struct SyslogWriter {
    socket: UdpSocket,
}

impl SyslogWriter {
    /// Bind an ephemeral local socket and connect it to the collector
    pub fn connect(address: &str) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect(address)?;
        Ok(Self { socket })
    }
}

impl io::Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;
    use std::time::Duration;

    #[test]
    fn sends_one_datagram_per_write() {
        let collector = UdpSocket::bind("127.0.0.1:0").unwrap();
        collector
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let address = collector.local_addr().unwrap().to_string();

        let mut writer = SyslogWriter::connect(&address).unwrap();
        writer.write_all(b"{\"level\":\"WARN\"}\n").unwrap();

        let mut buf = [0u8; 1024];
        let received = collector.recv(&mut buf).unwrap();
        assert_eq!(&buf[..received], b"{\"level\":\"WARN\"}\n");
    }

    #[test]
    fn unresolvable_host_is_an_error() {
        assert!(SyslogWriter::connect("definitely-not-a-host.invalid:514").is_err());
    }
}
